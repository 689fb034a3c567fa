//! Handler registry ordering, matching and allocation-failure handling.

use test_support::{MockFactory, capturing_interposer};
use wrap::{HandlerBinding, Level, Registry, WrapConfig, WrapError};

#[test]
fn test_resolve_exact_match_only() {
    let factory = MockFactory::new();
    let mut registry = Registry::new();
    registry.register([factory.binding("/dev/nvhost-ctrl")]);

    assert!(registry.resolve("/dev/nvhost-ctrl").is_some());
    assert!(registry.resolve("/dev/nvhost").is_none());
    assert!(registry.resolve("/dev/nvhost-ctrl/").is_none());
    assert!(registry.resolve("/dev/NVHOST-CTRL").is_none());
}

#[test]
fn test_first_registered_binding_wins() {
    let factory = MockFactory::new();
    let first = factory.binding("/dev/y");
    let second = factory.failing_binding("/dev/y", WrapError::NoDevice);

    let mut registry = Registry::new();
    registry.register([first.clone()]);
    registry.register([second]);

    assert_eq!(registry.len(), 2);
    for _ in 0..3 {
        let found = registry.resolve("/dev/y").unwrap();
        assert!(found.same_opener(&first));
    }
}

#[test]
fn test_order_preserved_across_batches() {
    let factory = MockFactory::new();
    let mut registry = Registry::new();
    registry.register([factory.binding("/dev/a"), factory.binding("/dev/b")]);
    registry.register([factory.binding("/dev/c")]);

    let paths: Vec<_> = registry.iter().map(|b| b.path().to_string()).collect();
    assert_eq!(paths, ["/dev/a", "/dev/b", "/dev/c"]);
}

#[test]
fn test_limit_drops_rest_of_batch() {
    let factory = MockFactory::new();
    let mut registry = Registry::with_limit(3);

    let outcome = registry.register([factory.binding("/dev/a"), factory.binding("/dev/b")]);
    assert_eq!(outcome.appended, 2);
    assert_eq!(outcome.dropped, 0);
    assert_eq!(outcome.cause, None);

    let outcome = registry.register([
        factory.binding("/dev/c"),
        factory.binding("/dev/d"),
        factory.binding("/dev/e"),
    ]);
    assert_eq!(outcome.appended, 1);
    assert_eq!(outcome.dropped, 2);
    assert_eq!(outcome.cause, Some(WrapError::RegistryFull));

    assert_eq!(registry.len(), 3);
    assert!(registry.resolve("/dev/a").is_some());
    assert!(registry.resolve("/dev/c").is_some());
    assert!(registry.resolve("/dev/d").is_none());
}

#[test]
fn test_try_push_reports_full_registry() {
    let factory = MockFactory::new();
    let mut registry = Registry::with_limit(0);
    assert_eq!(
        registry.try_push(factory.binding("/dev/a")),
        Err(WrapError::RegistryFull)
    );
    assert!(registry.is_empty());
}

#[test]
fn test_interposer_reports_dropped_bindings() {
    let factory = MockFactory::new();
    let (wrap, sink) = capturing_interposer(WrapConfig::default().with_max_bindings(1));

    let appended = wrap.register([factory.binding("/dev/a"), factory.binding("/dev/b")]);
    assert_eq!(appended, 1);
    assert_eq!(wrap.binding_count(), 1);

    let errors = sink.lines_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("dropped 1"));
    assert!(errors[0].starts_with("handler registry full"));
    assert!(!errors[0].contains("out of memory"));

    // 已注册的绑定继续工作
    assert!(wrap.intercept_open("/dev/a", 4).is_some());
    assert!(wrap.intercept_open("/dev/b", 5).is_none());
}

#[test]
fn test_binding_debug_shows_path() {
    let binding = HandlerBinding::new("/dev/x", |_, _| Err(WrapError::NoDevice));
    let text = format!("{:?}", binding);
    assert!(text.contains("/dev/x"));
}

#[test]
fn test_binding_iterator_may_query_interposer() {
    let factory = MockFactory::new();
    let (wrap, _) = capturing_interposer(WrapConfig::default());
    wrap.register([factory.binding("/dev/a")]);

    // 惰性的绑定表在迭代时查询同一个拦截器
    let mut seen = Vec::new();
    let appended = wrap.register(["/dev/a", "/dev/b"].iter().map(|p| {
        seen.push((wrap.resolve(p).is_some(), wrap.binding_count()));
        factory.binding(p)
    }));

    assert_eq!(appended, 2);
    assert_eq!(seen, [(true, 1), (false, 1)]);
    assert_eq!(wrap.binding_count(), 3);
    assert!(format!("{:?}", wrap).contains("bindings: 3"));
}
