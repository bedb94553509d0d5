use pretty_assertions::assert_eq;

use prune_infos::{InfoError, MemberKey};
use prune_ir::{ClassDef, Expr, ExprKind, Name};
use prune_linker::{link, LinkErrorKind, LinkerConfig, LinkerError};

use super::common::{
    block, call, call_static, class, exported_method, method, module, new_instance, object_class,
    Fixture,
};

#[test]
fn every_missing_symbol_is_reported_in_one_run() {
    let fx = Fixture::new();
    let main = fx.name("app.Main");
    let gone = fx.name("app.Gone");
    let missing = fx.name("app.Missing");

    let mut main_def = module(main);
    main_def.methods.push(exported_method(
        fx.name("main"),
        block(vec![call_static(gone, fx.name("run")), new_instance(missing)]),
    ));

    let output = link(&[object_class(), main_def], &LinkerConfig::default()).unwrap();
    let kinds: Vec<_> = output.analysis.errors().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![LinkErrorKind::MissingClass(gone), LinkErrorKind::MissingClass(missing)]
    );

    let rendered: Vec<String> = output
        .analysis
        .errors()
        .iter()
        .map(|e| e.display(&fx.interner).to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "error[L0001]: referring to non-existent unit `app.Gone`\n  \
             referenced from app.Main.main"
                .to_string(),
            "error[L0001]: referring to non-existent unit `app.Missing`\n  \
             referenced from app.Main.main"
                .to_string(),
        ]
    );

    // The rest of the program is still analyzed.
    assert!(output
        .analysis
        .is_member_reached(main, MemberKey::public(fx.name("main"))));
}

fn broken_unit(fx: &Fixture, name: &str) -> ClassDef {
    let mut def = class(fx.name(name));
    // A statement has no type, so it cannot receive a virtual call.
    let receiver = Expr::stat(ExprKind::Skip);
    def.methods.push(method(fx.name("bad"), call(receiver, fx.name("run"))));
    def
}

fn extraction_failure(units: &[ClassDef], parallel: bool) -> (Name, InfoError) {
    let config = LinkerConfig::default().with_parallel(parallel);
    match link(units, &config).unwrap_err() {
        LinkerError::Extraction { unit, source } => (unit, source),
    }
}

#[test]
fn malformed_receiver_fails_extraction_with_unit_name() {
    let fx = Fixture::new();
    let units = [object_class(), broken_unit(&fx, "app.Broken")];

    let (unit, source) = extraction_failure(&units, false);
    assert_eq!(unit, fx.name("app.Broken"));
    assert!(matches!(
        source.root_cause(),
        InfoError::InvalidReceiverType { .. }
    ));
    assert!(matches!(source, InfoError::InMember { .. }));
}

#[test]
fn first_failing_unit_is_reported_in_parallel_too() {
    let fx = Fixture::new();
    let units = [
        object_class(),
        broken_unit(&fx, "app.First"),
        broken_unit(&fx, "app.Second"),
    ];

    assert_eq!(extraction_failure(&units, true).0, fx.name("app.First"));
    assert_eq!(extraction_failure(&units, false).0, fx.name("app.First"));
}
