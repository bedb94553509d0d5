use pretty_assertions::assert_eq;

use prune_infos::MemberKey;
use prune_ir::{names, ClassDef, Expr, Type};
use prune_linker::{link, LinkerConfig, Root, RootSet};

use super::common::{
    abstract_method, arithmetic_exception, block, call, class, exported_method, int_div,
    interface, method, module, new_instance, object_class, static_field, val, var, Fixture,
};

/// `Shape.area` implemented by `Circle` and `Square`; `Main.main` only
/// creates circles.
fn shapes(fx: &Fixture) -> Vec<ClassDef> {
    let shape = fx.name("app.Shape");
    let circle = fx.name("app.Circle");
    let square = fx.name("app.Square");
    let area = fx.name("area");
    let s = fx.name("s");

    let mut shape_def = interface(shape);
    shape_def.methods.push(abstract_method(area));

    let mut circle_def = class(circle);
    circle_def.interfaces.push(shape);
    circle_def.methods.push(method(area, Expr::int(3)));

    let mut square_def = class(square);
    square_def.interfaces.push(shape);
    square_def.methods.push(method(area, Expr::int(4)));

    let mut main_def = module(fx.name("app.Main"));
    main_def.methods.push(exported_method(
        fx.name("main"),
        block(vec![
            val(s, Type::Class(shape), new_instance(circle)),
            call(var(s, Type::Class(shape)), area),
        ]),
    ));

    vec![object_class(), shape_def, circle_def, square_def, main_def]
}

#[test]
fn only_instantiated_implementation_is_kept() {
    let fx = Fixture::new();
    let output = link(&shapes(&fx), &LinkerConfig::default()).unwrap();
    let analysis = &output.analysis;
    let area = MemberKey::public(fx.name("area"));

    assert!(!analysis.has_errors());
    assert!(analysis.is_member_reached(fx.name("app.Circle"), area));
    assert!(analysis.is_instantiated(fx.name("app.Circle")));
    assert!(!analysis.is_reached(fx.name("app.Square")));
    assert_eq!(analysis.abstract_members(fx.name("app.Shape")), &[area]);
    assert!(analysis.is_module_accessed(fx.name("app.Main")));
}

#[test]
fn parallel_and_sequential_extraction_agree() {
    let fx = Fixture::new();
    let units = shapes(&fx);
    let parallel = link(&units, &LinkerConfig::default()).unwrap();
    let sequential = link(&units, &LinkerConfig::default().with_parallel(false)).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn explicit_roots_keep_unexported_code() {
    let fx = Fixture::new();
    let square = fx.name("app.Square");
    let area = MemberKey::public(fx.name("area"));
    let roots = RootSet::new().with(Root::Instantiate {
        class: square,
        ctor: names::NO_ARG_CONSTRUCTOR,
    });

    let output = link(&shapes(&fx), &LinkerConfig::default().with_roots(roots)).unwrap();
    // Main already calls `area` on a shape, so the new instance is dispatched to.
    assert!(output.analysis.is_member_reached(square, area));
}

fn divide_program(fx: &Fixture, divisor: Expr) -> Vec<ClassDef> {
    let mut main_def = module(fx.name("app.Main"));
    main_def.methods.push(exported_method(
        fx.name("main"),
        int_div(var(fx.name("x"), Type::INT), divisor),
    ));
    vec![object_class(), arithmetic_exception(), main_def]
}

#[test]
fn division_by_variable_keeps_arithmetic_exception() {
    let fx = Fixture::new();
    let divisor = var(fx.name("y"), Type::INT);
    let output = link(&divide_program(&fx, divisor), &LinkerConfig::default()).unwrap();

    assert!(output.analysis.is_instantiated(names::ARITHMETIC_EXCEPTION_CLASS));
    assert!(output.analysis.is_member_reached(
        names::ARITHMETIC_EXCEPTION_CLASS,
        MemberKey::constructor(names::STRING_ARG_CONSTRUCTOR),
    ));
}

#[test]
fn division_by_nonzero_literal_drops_arithmetic_exception() {
    let fx = Fixture::new();
    let output = link(&divide_program(&fx, Expr::int(2)), &LinkerConfig::default()).unwrap();

    assert!(!output.analysis.is_reached(names::ARITHMETIC_EXCEPTION_CLASS));
    assert!(!output.analysis.has_errors());
}

#[test]
fn exported_field_is_read_and_written() {
    let fx = Fixture::new();
    let settings = fx.name("app.Settings");
    let level = fx.name("level");
    let mut settings_def = class(settings);
    static_field(&mut settings_def, level, fx.name("logLevel"));

    let output = link(&[object_class(), settings_def], &LinkerConfig::default()).unwrap();
    assert_eq!(output.analysis.static_fields_read(settings), &[level]);
    assert_eq!(output.analysis.static_fields_written(settings), &[level]);
    assert!(!output.analysis.is_instantiated(settings));
}
