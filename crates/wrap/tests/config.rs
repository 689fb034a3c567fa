//! Configuration defaults, environment parsing and errno mapping.

use wrap::config::{ALIAS_SLOTS_ENV, DEFAULT_ALIAS_CAPACITY, VERBOSE_ENV};
use wrap::{AliasCapacity, TraceFlags, WrapConfig};

#[test]
fn test_defaults() {
    let config = WrapConfig::default();
    assert_eq!(
        config.alias_capacity,
        AliasCapacity::Bounded(DEFAULT_ALIAS_CAPACITY)
    );
    assert!(config.trace.is_empty());
    assert_eq!(config.max_bindings, None);
}

#[test]
fn test_from_vars() {
    let config = WrapConfig::from_vars(Some("1"), Some("unbounded"));
    assert!(config.trace.is_verbose());
    assert_eq!(config.alias_capacity, AliasCapacity::Unbounded);

    let config = WrapConfig::from_vars(Some("dup,close"), Some(" 2 "));
    assert_eq!(config.trace, TraceFlags::DUP | TraceFlags::CLOSE);
    assert_eq!(config.alias_capacity, AliasCapacity::Bounded(2));
}

#[test]
fn test_from_vars_ignores_garbage() {
    let config = WrapConfig::from_vars(Some("loud"), Some("many"));
    assert_eq!(config, WrapConfig::default());

    let config = WrapConfig::from_vars(None, None);
    assert_eq!(config, WrapConfig::default());
}

#[test]
fn test_from_env() {
    // SAFETY: 本测试文件中只有这一个测试修改环境变量
    unsafe {
        std::env::set_var(VERBOSE_ENV, "open");
        std::env::set_var(ALIAS_SLOTS_ENV, "4");
    }
    let config = WrapConfig::from_env();
    assert_eq!(config.trace, TraceFlags::OPEN);
    assert_eq!(config.alias_capacity, AliasCapacity::Bounded(4));
    unsafe {
        std::env::remove_var(VERBOSE_ENV);
        std::env::remove_var(ALIAS_SLOTS_ENV);
    }
}

#[test]
fn test_builder() {
    let config = WrapConfig::default()
        .with_alias_capacity(AliasCapacity::Bounded(1))
        .with_max_bindings(16)
        .verbose();
    assert!(config.trace.contains(TraceFlags::HEXDUMP));
    assert_eq!(config.max_bindings, Some(16));
    assert!(AliasCapacity::Bounded(1).admits(0));
    assert!(!AliasCapacity::Bounded(1).admits(1));
    assert!(AliasCapacity::Unbounded.admits(usize::MAX - 1));
}

#[test]
fn test_errno_mapping() {
    use wrap::WrapError;
    assert_eq!(WrapError::NoWrapper.to_errno(), -2);
    assert_eq!(WrapError::BadFileDescriptor.to_errno(), -9);
    assert_eq!(WrapError::TooManyAliases.to_errno(), -24);
    assert_eq!(WrapError::RegistryFull.to_errno(), -28);
    assert_ne!(
        WrapError::RegistryFull.to_string(),
        WrapError::OutOfMemory.to_string()
    );
    assert_eq!(WrapError::OpenFailed.to_string(), "handler failed to open");
}
