use std::env;

const PORT_ENV_VAR: &str = "PORT";

const MIN_PORT: u32 = 1024;
const MAX_PORT: u32 = 65535;

#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("PORT value '{0}' is not an unsigned integer")]
    Malformed(String),

    #[error("port value {0} is outside the valid range, it must be >= 1024 and <= 65535")]
    OutOfRange(u32),
}

/// Returns the `PORT` environment variable if set and non-empty, otherwise
/// `default_val`. The resolved port must parse as an unsigned integer and lie
/// in `[1024, 65535]`.
pub fn resolve_port(default_val: u32) -> Result<u32, PortError> {
    let port = lookup_or_default(default_val)?;
    verify_port_range(port)?;
    Ok(port)
}

fn lookup_or_default(default_val: u32) -> Result<u32, PortError> {
    match env::var(PORT_ENV_VAR) {
        Ok(raw) if !raw.is_empty() => raw.parse().map_err(|_| PortError::Malformed(raw)),
        _ => Ok(default_val),
    }
}

fn verify_port_range(port: u32) -> Result<(), PortError> {
    if port < MIN_PORT || port > MAX_PORT {
        return Err(PortError::OutOfRange(port));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module mutate the process environment; they hold this
    // lock so parallel test threads do not trample each other's PORT.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_port_env<T>(value: Option<&str>, test: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap();
        match value {
            Some(v) => env::set_var(PORT_ENV_VAR, v),
            None => env::remove_var(PORT_ENV_VAR),
        }
        let result = test();
        env::remove_var(PORT_ENV_VAR);
        result
    }

    #[test]
    fn the_default_is_used_when_the_variable_is_unset() {
        with_port_env(None, || {
            assert_eq!(3434, resolve_port(3434).unwrap());
        });
    }

    #[test]
    fn the_default_is_used_when_the_variable_is_empty() {
        with_port_env(Some(""), || {
            assert_eq!(3434, resolve_port(3434).unwrap());
        });
    }

    #[test]
    fn the_environment_value_wins_when_set() {
        with_port_env(Some("8080"), || {
            assert_eq!(8080, resolve_port(3434).unwrap());
        });
    }

    #[test]
    fn a_non_numeric_value_is_rejected() {
        with_port_env(Some("not-a-port"), || {
            assert!(matches!(resolve_port(3434), Err(PortError::Malformed(_))));
        });
    }

    #[test]
    fn a_port_below_the_valid_range_is_rejected() {
        with_port_env(Some("1023"), || {
            assert!(matches!(resolve_port(3434), Err(PortError::OutOfRange(1023))));
        });
    }

    #[test]
    fn the_range_bounds_are_inclusive() {
        with_port_env(Some("1024"), || {
            assert_eq!(1024, resolve_port(3434).unwrap());
        });
        with_port_env(Some("65535"), || {
            assert_eq!(65535, resolve_port(3434).unwrap());
        });
    }

    #[test]
    fn a_port_above_the_valid_range_is_rejected() {
        with_port_env(Some("65536"), || {
            assert!(matches!(resolve_port(3434), Err(PortError::OutOfRange(65536))));
        });
    }
}
