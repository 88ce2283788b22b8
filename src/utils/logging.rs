//! Console logger setup.

use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Env, Target};

pub const LOG_ENV: &str = "CLEANER_LOG";
pub const LOG_STYLE_ENV: &str = "CLEANER_LOG_STYLE";

/// Initialise `env_logger`; `CLEANER_LOG` overrides `default_level`.
/// Safe to call more than once.
pub fn init_logging(default_level: &str) {
    let env = Env::default()
        .filter_or(LOG_ENV, default_level)
        .write_style_or(LOG_STYLE_ENV, "auto");

    Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Stdout)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging("debug");
        init_logging("info");
        log::info!("logger ready");
    }
}
