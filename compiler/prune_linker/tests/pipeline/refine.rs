use pretty_assertions::assert_eq;

use prune_ir::ClassDef;
use prune_linker::{link, refine, LinkErrorKind, LinkerConfig};

use super::common::{
    block, class, exported_method, load_module, module, new_instance, object_class, transient,
    Fixture,
};

/// `Main.main` creates a widget; after rewriting, its body is a marker
/// around a load of `app.Helper`.
fn program(fx: &Fixture) -> (Vec<ClassDef>, ClassDef) {
    let widget = fx.name("app.Widget");
    let helper = fx.name("app.Helper");
    let main = fx.name("app.Main");
    let entry = fx.name("main");

    let mut main_def = module(main);
    main_def
        .methods
        .push(exported_method(entry, block(vec![new_instance(widget)])));

    let mut rewritten = module(main);
    rewritten.methods.push(exported_method(
        entry,
        transient(fx.name("inlined"), vec![load_module(helper)]),
    ));

    (vec![object_class(), class(widget), main_def], rewritten)
}

#[test]
fn refinement_tolerates_symbols_not_yet_materialized() {
    let fx = Fixture::new();
    let (units, rewritten) = program(&fx);
    let output = link(&units, &LinkerConfig::default()).unwrap();
    assert!(!output.analysis.has_errors());

    let refined = refine(&output.infos, &[rewritten], &LinkerConfig::for_refinement()).unwrap();
    assert!(!refined.analysis.has_errors());
    assert!(!refined.analysis.is_reached(fx.name("app.Helper")));
}

#[test]
fn strict_refinement_reports_missing_symbols() {
    let fx = Fixture::new();
    let (units, rewritten) = program(&fx);
    let output = link(&units, &LinkerConfig::default()).unwrap();

    let refined = refine(&output.infos, &[rewritten], &LinkerConfig::default()).unwrap();
    let kinds: Vec<_> = refined.analysis.errors().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![LinkErrorKind::MissingClass(fx.name("app.Helper"))]);
}

#[test]
fn refinement_only_adds_edges() {
    let fx = Fixture::new();
    let (units, rewritten) = program(&fx);
    let output = link(&units, &LinkerConfig::default()).unwrap();

    let helper = fx.name("app.Helper");
    let refined = refine(
        &output.infos,
        &[rewritten, module(helper)],
        &LinkerConfig::for_refinement(),
    )
    .unwrap();

    // The widget edge from the first extraction survives the rewrite.
    assert!(refined.analysis.is_instantiated(fx.name("app.Widget")));
    assert!(refined.analysis.is_module_accessed(helper));
    assert_eq!(refined.infos.len(), output.infos.len() + 1);
    assert_eq!(refined.infos.last().map(|info| info.name), Some(helper));
}
