//! IR → dependency record extraction.
//!
//! One downward pass over each member body. [`DependencyTraverser`] matches
//! every [`ExprKind`] exhaustively, so a new node kind cannot be added
//! without deciding what it records.

use prune_stack::ensure_sufficient_stack;

use prune_ir::{
    names, ClassDef, Expr, ExprKind, FieldDef, Literal, MemberNamespace, MethodDef, Name,
    ParamDef, PropertyDef, TopLevelExportDef, Type,
};

use crate::builder::ReachabilityInfoBuilder;
use crate::error::InfoError;
use crate::info::{ClassInfo, MemberInfo, MemberKey, ReachabilityInfo};

/// Extract the dependency record of a whole unit.
///
/// Pure function of `class`; safe to call concurrently for different units.
/// Fails only on malformed IR, in which case no partial record is produced.
pub fn generate_class_info(class: &ClassDef) -> Result<ClassInfo, InfoError> {
    let mut members = Vec::with_capacity(class.methods.len() + class.properties.len() + 1);

    for method in &class.methods {
        members.push(generate_member_info(method)?);
    }
    for property in &class.properties {
        members.push(generate_property_info(property)?);
    }
    if !class.top_level_exports.is_empty() {
        members.push(generate_top_level_exports_info(
            class.name,
            &class.top_level_exports,
        )?);
    }
    let members = merge_duplicate_keys(members);

    let mut referenced_field_classes: Vec<_> = class
        .fields
        .iter()
        .filter_map(|f: &FieldDef| f.ftpe.class_name())
        .collect();
    referenced_field_classes.sort_unstable();
    referenced_field_classes.dedup();

    tracing::trace!(
        class = class.name.raw(),
        members = members.len(),
        "extracted class info"
    );

    Ok(ClassInfo {
        name: class.name,
        kind: class.kind,
        superclass: class.superclass,
        interfaces: class.interfaces.clone(),
        referenced_field_classes,
        members,
        is_exported: class.is_exported(),
        top_level_export_names: class
            .top_level_exports
            .iter()
            .map(TopLevelExportDef::export_name)
            .collect(),
    })
}

/// Sort members by key, folding records that share one.
///
/// A property and a public method of the same name land on one key.
fn merge_duplicate_keys(mut members: Vec<MemberInfo>) -> Vec<MemberInfo> {
    members.sort_by_key(|m| m.key);
    let mut merged: Vec<MemberInfo> = Vec::with_capacity(members.len());
    for member in members {
        match merged.last_mut() {
            Some(last) if last.key == member.key => {
                tracing::debug!(
                    member = member.key.name.raw(),
                    "merging members with the same key"
                );
                last.merge(&member);
            }
            _ => merged.push(member),
        }
    }
    merged
}

/// Extract the dependency record of one method or constructor.
pub fn generate_member_info(method: &MethodDef) -> Result<MemberInfo, InfoError> {
    let mut traverser = DependencyTraverser::new();
    traverser.traverse_signature(&method.params, &method.result);
    if let Some(body) = &method.body {
        traverser
            .traverse(body)
            .map_err(|e| e.in_member(method.namespace, method.name))?;
    }

    Ok(MemberInfo {
        key: MemberKey::new(method.namespace, method.name),
        is_abstract: method.is_abstract(),
        is_exported: method.exported,
        reachability: traverser.finish(),
    })
}

/// Extract one record covering both accessors of a host-facing property.
pub fn generate_property_info(property: &PropertyDef) -> Result<MemberInfo, InfoError> {
    let in_property = |e: InfoError| e.in_member(MemberNamespace::Public, property.name);
    let mut traverser = DependencyTraverser::new();
    if let Some(getter) = &property.getter {
        traverser.traverse(getter).map_err(in_property)?;
    }
    if let Some((param, body)) = &property.setter {
        traverser.traverse_signature(std::slice::from_ref(param), &Type::NoType);
        traverser.traverse(body).map_err(in_property)?;
    }

    Ok(MemberInfo {
        key: MemberKey::public(property.name),
        is_abstract: false,
        is_exported: true,
        reachability: traverser.finish(),
    })
}

/// Fold a unit's top-level exports into one synthetic member.
///
/// Exported fields count as both read and written, since host code may
/// get or set them at any time.
pub fn generate_top_level_exports_info(
    owner: Name,
    exports: &[TopLevelExportDef],
) -> Result<MemberInfo, InfoError> {
    let key = MemberKey::static_method(names::TOP_LEVEL_EXPORTS);
    let mut traverser = DependencyTraverser::new();
    for export in exports {
        match export {
            TopLevelExportDef::Method { body, .. } => traverser
                .traverse(body)
                .map_err(|e| e.in_member(key.namespace, key.name))?,
            TopLevelExportDef::Field { field, .. } => {
                traverser.builder.add_static_field_read(owner, *field);
                traverser.builder.add_static_field_written(owner, *field);
            }
            TopLevelExportDef::ModuleAccessor { .. } => {
                traverser.builder.add_accessed_module(owner);
            }
        }
    }
    Ok(MemberInfo {
        key,
        is_abstract: false,
        is_exported: true,
        reachability: traverser.finish(),
    })
}

/// Re-extract the dependencies of an already-built body.
///
/// Used after a refinement pass rewrote a body; the result only ever adds
/// edges relative to what the new tree contains.
pub fn generate_reachability_info(body: &Expr) -> Result<ReachabilityInfo, InfoError> {
    let mut traverser = DependencyTraverser::new();
    traverser.traverse(body)?;
    Ok(traverser.finish())
}

/// Records the dependencies of one tree into a builder.
struct DependencyTraverser {
    builder: ReachabilityInfoBuilder,
}

impl DependencyTraverser {
    fn new() -> Self {
        Self {
            builder: ReachabilityInfoBuilder::new(),
        }
    }

    fn finish(self) -> ReachabilityInfo {
        self.builder.finish()
    }

    fn traverse_signature(&mut self, params: &[ParamDef], result: &Type) {
        for param in params {
            self.reference_type(&param.ptpe);
        }
        self.reference_type(result);
    }

    fn reference_type(&mut self, tpe: &Type) {
        if let Some(class) = tpe.class_name() {
            self.builder.add_referenced_class(class);
        }
    }

    fn traverse_all(&mut self, exprs: &[Expr]) -> Result<(), InfoError> {
        for expr in exprs {
            self.traverse(expr)?;
        }
        Ok(())
    }

    fn traverse(&mut self, expr: &Expr) -> Result<(), InfoError> {
        ensure_sufficient_stack(|| self.traverse_inner(expr))
    }

    fn traverse_inner(&mut self, expr: &Expr) -> Result<(), InfoError> {
        if !matches!(expr.kind, ExprKind::Transient { .. }) {
            self.reference_type(&expr.tpe);
        }

        match &expr.kind {
            ExprKind::Assign { lhs, rhs } => {
                if let ExprKind::SelectStatic { class, field } = &lhs.kind {
                    self.builder.add_static_field_written(*class, *field);
                } else {
                    self.traverse(lhs)?;
                }
                self.traverse(rhs)
            }

            ExprKind::SelectStatic { class, field } => {
                self.builder.add_static_field_read(*class, *field);
                Ok(())
            }

            ExprKind::Apply {
                receiver,
                method,
                args,
            } => {
                self.add_method_called_on_type(&receiver.tpe, *method)?;
                self.traverse(receiver)?;
                self.traverse_all(args)
            }

            ExprKind::ApplyStatically {
                namespace,
                receiver,
                class,
                method,
                args,
            } => {
                self.builder
                    .add_method_called_statically(*class, MemberKey::new(*namespace, *method));
                self.traverse(receiver)?;
                self.traverse_all(args)
            }

            ExprKind::ApplyStatic {
                class,
                method,
                args,
            } => {
                self.builder
                    .add_method_called_statically(*class, MemberKey::static_method(*method));
                self.traverse_all(args)
            }

            ExprKind::New { class, ctor, args } => {
                self.builder.add_instantiation(*class, *ctor);
                self.traverse_all(args)
            }

            ExprKind::LoadModule(module) => {
                self.builder.add_accessed_module(*module);
                Ok(())
            }

            ExprKind::IsInstanceOf { expr, test } => {
                if let Some(class) = test.base_class() {
                    self.builder.add_used_instance_test(class);
                }
                self.traverse(expr)
            }

            ExprKind::AsInstanceOf { expr, target } => {
                if let Some(class) = target.base_class() {
                    self.builder.add_used_instance_test(class);
                }
                self.traverse(expr)
            }

            ExprKind::NewArray { type_ref, lengths } => {
                if let Some(class) = type_ref.base.class_name() {
                    self.builder.add_accessed_class_data(class);
                }
                self.traverse_all(lengths)
            }

            ExprKind::ArrayValue { type_ref, elems } => {
                if let Some(class) = type_ref.base.class_name() {
                    self.builder.add_accessed_class_data(class);
                }
                self.traverse_all(elems)
            }

            ExprKind::Literal(Literal::ClassOf(type_ref)) => {
                if let Some(class) = type_ref.base_class() {
                    self.builder.add_accessed_class_data(class);
                }
                Ok(())
            }

            ExprKind::Binary { op, lhs, rhs } => {
                if op.is_integral_division() && !rhs.is_nonzero_integral_literal() {
                    self.builder.add_arithmetic_exception();
                }
                self.traverse(lhs)?;
                self.traverse(rhs)
            }

            ExprKind::VarDef { vtpe, rhs, .. } => {
                self.reference_type(vtpe);
                self.traverse(rhs)
            }

            ExprKind::HostGlobalRef(global) => {
                self.builder.add_used_host_global(*global);
                Ok(())
            }

            ExprKind::Transient { args, .. } => self.traverse_all(args),

            ExprKind::Select {
                qualifier, class, ..
            } => {
                self.builder.add_referenced_class(*class);
                self.traverse(qualifier)
            }

            ExprKind::Closure {
                params,
                body,
                captures,
            } => {
                self.traverse_signature(params, &Type::Any);
                self.traverse_all(captures)?;
                self.traverse(body)
            }

            // Structural traversal only.
            ExprKind::Block(stats) => self.traverse_all(stats),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.traverse(cond)?;
                self.traverse(then_branch)?;
                self.traverse(else_branch)
            }
            ExprKind::While { cond, body } => {
                self.traverse(cond)?;
                self.traverse(body)
            }
            ExprKind::TryCatch { block, handler, .. } => {
                self.traverse(block)?;
                self.traverse(handler)
            }
            ExprKind::TryFinally { block, finalizer } => {
                self.traverse(block)?;
                self.traverse(finalizer)
            }
            ExprKind::Return(inner)
            | ExprKind::Throw(inner)
            | ExprKind::ArrayLength(inner)
            | ExprKind::GetClass(inner)
            | ExprKind::Unary { lhs: inner, .. } => self.traverse(inner),
            ExprKind::ArraySelect { array, index } => {
                self.traverse(array)?;
                self.traverse(index)
            }
            ExprKind::RecordValue(elems) => self.traverse_all(elems),
            ExprKind::HostCall { target, args } => {
                self.traverse(target)?;
                self.traverse_all(args)
            }
            ExprKind::Skip | ExprKind::Literal(_) | ExprKind::VarRef(_) | ExprKind::This => Ok(()),
        }
    }

    /// Record a virtual call, keyed by the canonical unit of its receiver.
    fn add_method_called_on_type(
        &mut self,
        receiver: &Type,
        method: Name,
    ) -> Result<(), InfoError> {
        match receiver {
            Type::Class(class) => self.builder.add_method_called(*class, method),
            Type::Any => self.builder.add_method_called(names::OBJECT_CLASS, method),
            Type::Prim(prim) => self.builder.add_method_called(prim.boxed_class(), method),
            // Arrays have no unit of their own: every method except `clone`
            // resolves to the root object's implementation, and `clone` is
            // provided by the runtime support layer.
            Type::Array(_) => {
                if method != names::CLONE_METHOD {
                    self.builder
                        .add_method_called_statically(names::OBJECT_CLASS, MemberKey::public(method));
                }
            }
            Type::Nothing | Type::Null => {}
            Type::NoType | Type::Record(_) => {
                return Err(InfoError::InvalidReceiverType {
                    receiver: receiver.clone(),
                    method,
                });
            }
        }
        Ok(())
    }
}
