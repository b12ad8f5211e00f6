pub mod build_info;

/// Installs the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence; `level` applies to this workspace's crates otherwise.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let mut filter = EnvFilter::from_default_env();
    for target in ["ticket_core", "tix_core", "tix_config", "tix_source_json"] {
        match format!("{target}={level}").parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(err) => eprintln!("ignoring log level `{level}`: {err}"),
        }
    }

    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!(%err, "global tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_install_is_tolerated() {
        super::init_tracing("info");
        super::init_tracing("debug");
    }
}
