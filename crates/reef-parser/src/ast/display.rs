//! Compact s-expression rendering of AST nodes.
//!
//! Operators and keywords lead their parenthesised group, so `a * b + c`
//! renders as `(+ (* a b) c)`. Children the parser could not produce are
//! written as `<missing>`.

use std::fmt::{self, Display, Formatter, Write};

use crate::ast::decl::{ClassField, LangFunction, LangProgram, ProgramClass, ProgramUnion, UnionVariant};
use crate::ast::expr::*;
use crate::ast::pattern::*;
use crate::ast::types::*;

const MISSING: &str = "<missing>";

struct Opt<'a, T>(Option<&'a T>);

impl<T: Display> Display for Opt<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(MISSING),
        }
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Writes each item preceded by a space.
fn write_spaced<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for item in items {
        write!(f, " {}", item)?;
    }
    Ok(())
}

impl Display for TypeIdentifier<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => named.fmt(f),
            Self::Tuple(tuple) => {
                write_boxing(f, tuple.boxing)?;
                f.write_char('(')?;
                write_list(f, tuple.members, ", ")?;
                f.write_char(')')
            }
            Self::Unit(_) => f.write_str("()"),
            Self::Fn(function) => {
                f.write_str("Fn(")?;
                for (i, parameter) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if parameter.is_mutable {
                        f.write_str("mut ")?;
                    }
                    write!(f, "{}", parameter.ty)?;
                }
                f.write_char(')')?;
                if let Some(return_type) = function.return_type {
                    write!(f, ": {}", return_type)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for NamedTypeIdentifier<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_boxing(f, self.boxing)?;
        f.write_str(self.name.lexeme)?;
        if !self.type_arguments.is_empty() {
            f.write_str("::<")?;
            write_list(f, self.type_arguments, ", ")?;
            f.write_char('>')?;
        }
        Ok(())
    }
}

fn write_boxing(f: &mut Formatter<'_>, boxing: Option<BoxingSpecifier>) -> fmt::Result {
    match boxing {
        Some(BoxingSpecifier::Boxed) => f.write_str("boxed "),
        Some(BoxingSpecifier::Unboxed) => f.write_str("unboxed "),
        None => Ok(()),
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueAccess(access) => f.write_str(access.token.lexeme),
            Self::Unary(unary) => write!(f, "({} {})", unary.op.symbol(), Opt(unary.operand)),
            Self::Binary(binary) => write!(f, "({} {} {})", binary.op.symbol(), binary.left, Opt(binary.right)),
            Self::MemberAccess(access) => {
                write!(f, "(. {} {})", access.owner, access.member.map_or(MISSING, |t| t.lexeme))
            }
            Self::StaticMemberAccess(access) => {
                write!(f, "(:: {} {})", access.owner, access.member.map_or(MISSING, |t| t.lexeme))
            }
            Self::GenericInstantiation(generic) => {
                write!(f, "(::< {}", generic.value)?;
                write_spaced(f, generic.type_arguments)?;
                f.write_char(')')
            }
            Self::VariableDeclaration(decl) => {
                f.write_str("(var ")?;
                if decl.is_mutable {
                    f.write_str("mut ")?;
                }
                f.write_str(decl.name.lexeme)?;
                if let Some(ty) = decl.ty {
                    write!(f, ": {}", ty)?;
                }
                if let Some(value) = decl.value {
                    write!(f, " = {}", value)?;
                }
                f.write_char(')')
            }
            Self::If(if_expr) => {
                write!(f, "(if {} {}", if_expr.check, Opt(if_expr.body))?;
                for else_if in if_expr.else_ifs {
                    write!(f, " (else-if {} {})", else_if.check, Opt(else_if.body))?;
                }
                if let Some(else_body) = if_expr.else_body {
                    write!(f, " (else {})", else_body)?;
                }
                f.write_char(')')
            }
            Self::While(while_expr) => write!(f, "(while {} {})", while_expr.check, Opt(while_expr.body)),
            Self::Break(_) => f.write_str("break"),
            Self::Continue(_) => f.write_str("continue"),
            Self::Block(block) => block.fmt(f),
            Self::MethodCall(call) => {
                write!(f, "(call {}", call.method)?;
                write_spaced(f, call.arguments)?;
                f.write_char(')')
            }
            Self::MethodReturn(ret) => match ret.value {
                Some(value) => write!(f, "(return {})", value),
                None => f.write_str("(return)"),
            },
            Self::ObjectInitializer(init) => {
                write!(f, "(new {}", init.ty)?;
                write_spaced(f, init.fields)?;
                f.write_char(')')
            }
            Self::UnionClassVariantInitializer(init) => {
                write!(f, "(new {}::{}", init.ty, init.variant.lexeme)?;
                write_spaced(f, init.fields)?;
                f.write_char(')')
            }
            Self::Tuple(tuple) => {
                f.write_str("(tuple")?;
                write_spaced(f, tuple.elements)?;
                f.write_char(')')
            }
            Self::Matches(matches) => write!(f, "(matches {} {})", matches.value, Opt(matches.pattern.as_ref())),
            Self::Match(m) => {
                write!(f, "(match {}", m.value)?;
                for arm in m.arms {
                    write!(f, " (=> {} {})", arm.pattern, Opt(arm.expression.as_ref()))?;
                }
                f.write_char(')')
            }
        }
    }
}

impl Display for Block<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(block")?;
        for function in self.functions {
            write!(f, " {}", function)?;
        }
        write_spaced(f, self.expressions)?;
        f.write_char(')')
    }
}

impl Display for FieldInitializer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.name.lexeme, Opt(self.value.as_ref()))
    }
}

impl Display for Pattern<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discard(_) => f.write_char('_'),
            Self::Variable(var) => {
                let binding = PatternBinding {
                    name: var.name,
                    is_mutable: var.is_mutable,
                };
                write!(f, "({})", binding)
            }
            Self::Type(ty) => match ty.binding {
                Some(binding) => write!(f, "({} {})", ty.ty, binding),
                None => ty.ty.fmt(f),
            },
            Self::UnionVariant(variant) => {
                let name = variant.variant.map_or(MISSING, |t| t.lexeme);
                match variant.binding {
                    Some(binding) => write!(f, "({}::{} {})", variant.ty, name, binding),
                    None => write!(f, "{}::{}", variant.ty, name),
                }
            }
            Self::UnionTupleVariant(variant) => {
                write!(f, "({}::{}", variant.ty, variant.variant.lexeme)?;
                write_spaced(f, variant.members)?;
                write_binding(f, variant.binding)?;
                f.write_char(')')
            }
            Self::UnionClassVariant(variant) => {
                write!(f, "({}::{} ", variant.ty, variant.variant.lexeme)?;
                write_field_patterns(f, variant.fields, variant.discard_remaining)?;
                write_binding(f, variant.binding)?;
                f.write_char(')')
            }
            Self::Class(class) => {
                write!(f, "({} ", class.ty)?;
                write_field_patterns(f, class.fields, class.discard_remaining)?;
                write_binding(f, class.binding)?;
                f.write_char(')')
            }
        }
    }
}

impl Display for PatternBinding<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_mutable {
            write!(f, "var mut {}", self.name.lexeme)
        } else {
            write!(f, "var {}", self.name.lexeme)
        }
    }
}

fn write_binding(f: &mut Formatter<'_>, binding: Option<PatternBinding<'_>>) -> fmt::Result {
    match binding {
        Some(binding) => write!(f, " {}", binding),
        None => Ok(()),
    }
}

fn write_field_patterns(f: &mut Formatter<'_>, fields: &[FieldPattern<'_>], discard_remaining: bool) -> fmt::Result {
    f.write_char('{')?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(field.name.lexeme)?;
        if let Some(pattern) = field.pattern {
            write!(f, ": {}", pattern)?;
        }
    }
    if discard_remaining {
        if !fields.is_empty() {
            f.write_str(", ")?;
        }
        f.write_char('_')?;
    }
    f.write_char('}')
}

impl Display for LangFunction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(fn {}", self.name.lexeme)?;
        if !self.type_parameters.is_empty() {
            f.write_char('<')?;
            for (i, parameter) in self.type_parameters.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(parameter.lexeme)?;
            }
            f.write_char('>')?;
        }
        f.write_str(" (")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if parameter.is_mutable {
                f.write_str("mut ")?;
            }
            write!(f, "{}: {}", parameter.name.lexeme, Opt(parameter.ty.as_ref()))?;
        }
        f.write_char(')')?;
        if let Some(return_type) = self.return_type {
            write!(f, ": {}", return_type)?;
        }
        write!(f, " {})", self.body)
    }
}

impl Display for ClassField<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(field {}: {}", self.name.lexeme, Opt(self.ty.as_ref()))?;
        if let Some(initializer) = self.initializer {
            write!(f, " = {}", initializer)?;
        }
        f.write_char(')')
    }
}

impl Display for ProgramClass<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(class {}", self.name.lexeme)?;
        write_spaced(f, self.fields)?;
        write_spaced(f, self.functions)?;
        f.write_char(')')
    }
}

impl Display for UnionVariant<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit { name } => f.write_str(name.lexeme),
            Self::Tuple { name, members } => {
                write!(f, "{}(", name.lexeme)?;
                write_list(f, *members, ", ")?;
                f.write_char(')')
            }
            Self::Class { name, fields } => {
                write!(f, "({}", name.lexeme)?;
                write_spaced(f, *fields)?;
                f.write_char(')')
            }
        }
    }
}

impl Display for ProgramUnion<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(union {}", self.name.lexeme)?;
        write_spaced(f, self.variants)?;
        write_spaced(f, self.functions)?;
        f.write_char(')')
    }
}

impl Display for LangProgram<'_> {
    /// One top-level item per line: classes, unions, functions, then
    /// statements.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let items = self
            .classes
            .iter()
            .map(|c| c as &dyn Display)
            .chain(self.unions.iter().map(|u| u as &dyn Display))
            .chain(self.functions.iter().map(|func| func as &dyn Display))
            .chain(self.expressions.iter().map(|e| e as &dyn Display));

        for (i, item) in items.enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Parser;
    use bumpalo::Bump;

    fn render(source: &str) -> String {
        let arena = Bump::new();
        let mut parser = Parser::new(source, &arena);
        parser.parse_expr(0).map(|e| e.to_string()).unwrap_or_default()
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(render("a * b + c"), "(+ (* a b) c)");
        assert_eq!(render("a + b * c"), "(+ a (* b c))");
        assert_eq!(render("-a * b"), "(* (- a) b)");
    }

    #[test]
    fn nested_patterns() {
        assert_eq!(
            render("a matches MyUnion::A(OtherUnion::C(var d))"),
            "(matches a (MyUnion::A (OtherUnion::C (var d))))"
        );
        assert_eq!(render("a matches MyClass { b, c: _ } var x"), "(matches a (MyClass {b, c: _} var x))");
    }

    #[test]
    fn missing_children() {
        assert_eq!(render("a +"), "(+ a <missing>)");
        assert_eq!(render("a."), "(. a <missing>)");
    }

    #[test]
    fn calls_and_generics() {
        assert_eq!(render("f::<int>(1, \"x\")"), "(call (::< f int) 1 \"x\")");
        assert_eq!(render("Result::<int, string>::Ok"), "(:: Result::<int, string> Ok)");
    }
}
