use std::fmt;

pub trait CliErrorTrait: std::fmt::Debug + Send + Sync + 'static {
    fn details(&self) -> CliErrorDetails;
}

pub type CliError = Box<dyn CliErrorTrait>;

#[derive(Debug)]
pub struct CliErrorDetails<'a> {
    pub context: &'a str,
    pub message: &'a str,
    /// Optional follow-up line shown below the message.
    pub hint: Option<&'a str>,
    pub debug: Option<&'a str>,
}

impl fmt::Display for dyn CliErrorTrait {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let details = self.details();
        match details.hint {
            Some(hint) => write!(f, "{}\n{}", details.message, hint),
            None => write!(f, "{}", details.message),
        }
    }
}

impl std::error::Error for dyn CliErrorTrait {}

// Definining custom CLI errors.
// --------------------------------------------------

#[macro_export]
macro_rules! define_cli_error {
    ($name:ident, $msg:expr) => {
        define_cli_error!($name, $msg, {});
    };
    ($name:ident, $msg:expr, { $($arg:ident : $argtype:ty),* $(,)? }) => {
        #[derive(Debug)]
        pub struct $name {
            context: String,
            message: String,
            debug: Option<String>,
        }

        impl $name {
            #[allow(dead_code)]
            #[track_caller]
            pub fn new($($arg: $argtype),*) -> $crate::CliError {
                Box::new($name {
                    context: std::backtrace::Backtrace::force_capture().to_string(),
                    message: format!($msg, $($arg = $arg),*),
                    debug: None,
                })
            }

            #[allow(dead_code)]
            #[track_caller]
            pub fn with_debug<D>(
                $($arg: $argtype,)*
                debug: &D,
            ) -> $crate::CliError where D: std::fmt::Debug {
                Box::new($name {
                    context: std::backtrace::Backtrace::force_capture().to_string(),
                    message: format!($msg, $($arg = $arg),*),
                    debug: Some(format!("{:?}", debug)),
                })
            }
        }

        impl $crate::CliErrorTrait for $name {
            fn details(&self) -> $crate::CliErrorDetails {
                $crate::CliErrorDetails {
                    context: &self.context,
                    message: &self.message,
                    hint: None,
                    debug: self.debug.as_deref(),
                }
            }
        }
    };
}

// Standard errors.
// --------------------------------------------------

define_cli_error!(IOError, "Failed to write output: {details}.", { details: &str });
