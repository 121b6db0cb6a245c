use std::sync::Arc;

use command_flags_core::{
    Flag, FlagBehavior, FlagParseFailed, FlagRegistry, ParseErrorKind, PresenceClass,
    RegistryError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Port;

impl FlagBehavior<u16> for Port {
    fn parse(&self, input: &str) -> Result<u16, FlagParseFailed> {
        input
            .parse()
            .map_err(|_| FlagParseFailed::new("'%s' is not a valid port", input))
    }

    fn suggest(&self) -> Vec<String> {
        vec!["25565".to_string()]
    }

    fn default_value(&self) -> Option<u16> {
        Some(25565)
    }
}

struct Level;

impl FlagBehavior<u8> for Level {
    fn parse(&self, input: &str) -> Result<u8, FlagParseFailed> {
        match input.to_ascii_lowercase().as_str() {
            "off" => Ok(0),
            "on" => Ok(1),
            other => match other.parse::<u8>() {
                Ok(level) if level <= 3 => Ok(level),
                _ => Err(FlagParseFailed::new(
                    "No such debug level '%s'. Please use a number from 0 to 3.",
                    input,
                )),
            },
        }
    }

    fn value_without_input(&self) -> Result<u8, FlagParseFailed> {
        Ok(1)
    }
}

struct Force;

impl FlagBehavior<bool> for Force {
    fn value_without_input(&self) -> Result<bool, FlagParseFailed> {
        Ok(true)
    }

    fn default_value(&self) -> Option<bool> {
        Some(false)
    }
}

struct Flags {
    port: Flag<u16>,
    level: Flag<u8>,
    force: Flag<bool>,
}

fn flags() -> Flags {
    Flags {
        port: Flag::required("Port", "--port", Port).with_aliases(["-P", "--listen"]),
        level: Flag::optional("DebugLevel", "--debug", Level).with_aliases(["-d"]),
        force: Flag::no_value("Force", "--force", Force).with_aliases(["-f"]),
    }
}

fn registry(flags: &Flags) -> FlagRegistry {
    let mut builder = FlagRegistry::builder();
    builder
        .register(&flags.port)
        .unwrap()
        .register(&flags.level)
        .unwrap()
        .register(&flags.force)
        .unwrap();
    builder.build()
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn test_all_tokens_resolve_to_owner() {
    let flags = flags();
    let registry = registry(&flags);

    for spec in registry.flags() {
        for token in spec.tokens() {
            assert_eq!(registry.resolve(token).map(|s| s.id()), Some(spec.id()));
            assert_eq!(
                registry.resolve(&token.to_uppercase()).map(|s| s.id()),
                Some(spec.id())
            );
        }
    }
}

#[test]
fn test_collision_leaves_registry_intact() {
    let flags = flags();
    let mut builder = FlagRegistry::builder();
    builder.register(&flags.port).unwrap();

    let clash = Flag::required("Listen", "--LISTEN", Port);
    let err = builder.register(&clash).unwrap_err();
    assert!(matches!(
        &err,
        RegistryError::DuplicateToken { owner, .. } if owner == "Port"
    ));
    assert_eq!(
        err.to_string(),
        "flag token '--LISTEN' of Listen is already claimed by Port"
    );

    let registry = builder.build();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve("--listen").unwrap().name, "Port");
    assert_eq!(registry.resolve("-p").unwrap().presence, PresenceClass::Required);
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn test_mixed_stream() {
    let flags = flags();
    let registry = registry(&flags);
    let result = registry.parse(&["start", "-f", "--listen", "8080", "-d", "off", "now"]);

    assert!(result.is_ok());
    assert_eq!(result.get(&flags.force), Some(&true));
    assert_eq!(result.get(&flags.port), Some(&8080));
    assert_eq!(result.get(&flags.level), Some(&0));
    assert_eq!(result.remaining(), ["start", "now"]);
}

#[test]
fn test_optional_consumes_non_flag_even_if_invalid() {
    let flags = flags();
    let registry = registry(&flags);
    let result = registry.parse(&["--debug", "9"]);

    assert!(result.get(&flags.level).is_none());
    assert_eq!(
        result.errors()[0].message(),
        "No such debug level '9'. Please use a number from 0 to 3."
    );
    assert!(result.remaining().is_empty());
}

#[test]
fn test_defaults_only_on_request() {
    let flags = flags();
    let registry = registry(&flags);
    let result = registry.parse(&["-d"]);

    assert_eq!(result.len(), 1);
    assert_eq!(result.get(&flags.level), Some(&1));
    assert_eq!(result.get(&flags.port), None);
    assert_eq!(result.get_or_default(&flags.port), Some(25565));
    assert_eq!(result.get_or_default(&flags.force), Some(false));
    assert_eq!(result.get_or_default(&flags.level), Some(1));
}

#[test]
fn test_present_but_failed_flag_has_no_default() {
    let flags = flags();
    let registry = registry(&flags);

    let result = registry.parse(&["--port"]);
    assert_eq!(result.errors()[0].kind, ParseErrorKind::MissingValue);
    assert_eq!(result.get_or_default(&flags.port), None);

    let result = registry.parse(&["--port", "http"]);
    assert_eq!(result.get_or_default(&flags.port), None);

    // A later success clears the earlier failure.
    let result = registry.parse(&["--port", "http", "-P", "8080"]);
    assert_eq!(result.get_or_default(&flags.port), Some(8080));
}

#[test]
fn test_required_at_end_then_report() {
    let flags = flags();
    let registry = registry(&flags);
    let result = registry.parse(&["-f", "-P"]);

    assert_eq!(result.errors()[0].kind, ParseErrorKind::MissingValue);
    let report = result.report();
    assert_eq!(report.errors[0].kind, "missing_value");
    assert_eq!(report.errors[0].token, "-P");
    assert_eq!(report.values.len(), 1);
}

#[test]
fn test_typed_get_with_foreign_handle_misses() {
    let flags = flags();
    let registry = registry(&flags);
    let result = registry.parse(&["--port", "1"]);

    // Same identity, different value type: no value is returned.
    let imposter: Flag<String> = Flag::required("Port", "--port", Text);
    assert_eq!(result.get(&imposter), None);
}

#[test]
fn test_handles_are_read_by_identity() {
    let flags = flags();
    let registry = registry(&flags);
    let result = registry.parse(&["--port", "1"]);

    // An unregistered handle with the same primary token and value type
    // reads the value bound through the registered one.
    let twin = Flag::optional("OtherPort", "--port", Port);
    assert_eq!(result.get(&twin), Some(&1));
}

struct Text;

impl FlagBehavior<String> for Text {
    fn parse(&self, input: &str) -> Result<String, FlagParseFailed> {
        Ok(input.to_string())
    }
}

#[test]
fn test_shared_registry_across_threads() {
    let flags = flags();
    let registry = Arc::new(registry(&flags));

    let handles: Vec<_> = (0..4u16)
        .map(|n| {
            let registry = Arc::clone(&registry);
            let port = flags.port.clone();
            std::thread::spawn(move || {
                let value = (8000 + n).to_string();
                let result = registry.parse(&["-p", value.as_str()]);
                *result.get(&port).unwrap()
            })
        })
        .collect();

    let mut ports: Vec<u16> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ports.sort_unstable();
    assert_eq!(ports, vec![8000, 8001, 8002, 8003]);
}
