//! Exit code constants for the depot CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown names, invalid config)
//! - 2: Requested version does not exist
//! - 3: Repository directory could not be read
//! - 4: Lock acquisition failure (timeout, cancellation, OS error)
//! - 5: The command run under a lock failed

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown repository/content type/format, invalid config.
pub const USER_ERROR: i32 = 1;

/// The version token selected an ordinal that has no file on disk.
pub const NO_SUCH_VERSION: i32 = 2;

/// The repository directory could not be enumerated.
pub const REPOSITORY_FAILURE: i32 = 3;

/// Lock acquisition failure: the lock could not be taken within the wait budget.
pub const LOCK_FAILURE: i32 = 4;

/// The protected scope (e.g. the child command of `depot lock`) failed.
pub const SCOPE_FAILURE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            NO_SUCH_VERSION,
            REPOSITORY_FAILURE,
            LOCK_FAILURE,
            SCOPE_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_fit_in_a_process_status() {
        for code in [SUCCESS, USER_ERROR, NO_SUCH_VERSION, REPOSITORY_FAILURE, LOCK_FAILURE, SCOPE_FAILURE] {
            assert!((0..=255).contains(&code));
        }
    }
}
