//! Type expressions.
//!
//! Snapshots spell types in a small syntax close to what a compiler would
//! print:
//!
//! ```text
//! type   := [ "[" module "]" ] name [ "<" type { "," type } ">" ] { "[]" | "?" }
//! name   := "void" | "dynamic" | keyword | type parameter | metadata name
//! ```
//!
//! Metadata names carry the arity of each generic level
//! (``System.Collections.Generic.Dictionary`2<string, int>``,
//! ``Demo.Outer`1+Inner<int>``); the type arguments of the whole chain are
//! listed once, outermost first. Parsing is purely syntactic: names are
//! resolved by the loader.

use thiserror::Error;

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Void,
    Dynamic,
    /// A keyword, type parameter or metadata name, with its arguments.
    Named {
        /// Module pinned with the `[Module]` prefix.
        module: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
    },
    Array(Box<TypeExpr>),
    /// `T?`
    Nullable(Box<TypeExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TypeExprError(String);

/// Parse a type expression.
pub fn parse(text: &str) -> Result<TypeExpr, TypeExprError> {
    let mut parser = Parser { text, pos: 0 };
    let expr = parser.parse_type()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(expr),
        Some(c) => Err(TypeExprError(format!(
            "unexpected '{}' at offset {}",
            c, parser.pos
        ))),
    }
}

/// C# keyword spelling of a core library type.
pub fn keyword_metadata_name(keyword: &str) -> Option<&'static str> {
    let name = match keyword {
        "bool" => "System.Boolean",
        "byte" => "System.Byte",
        "sbyte" => "System.SByte",
        "char" => "System.Char",
        "decimal" => "System.Decimal",
        "double" => "System.Double",
        "float" => "System.Single",
        "short" => "System.Int16",
        "ushort" => "System.UInt16",
        "int" => "System.Int32",
        "uint" => "System.UInt32",
        "long" => "System.Int64",
        "ulong" => "System.UInt64",
        "nint" => "System.IntPtr",
        "nuint" => "System.UIntPtr",
        "object" => "System.Object",
        "string" => "System.String",
        _ => return None,
    };
    Some(name)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeExprError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(TypeExprError(format!(
                "expected '{}' at offset {}",
                expected, self.pos
            )))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &str {
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeExprError> {
        self.skip_whitespace();

        let module = if self.eat('[') {
            let module = self.take_while(|c| c != ']').trim().to_string();
            self.expect(']')?;
            if module.is_empty() {
                return Err(TypeExprError("empty module name".to_string()));
            }
            self.skip_whitespace();
            Some(module)
        } else {
            None
        };

        let name = self
            .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '`' | '@'))
            .to_string();
        if name.is_empty() {
            return Err(TypeExprError(format!(
                "expected a type name at offset {}",
                self.pos
            )));
        }

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        }

        let special = match name.as_str() {
            "void" if module.is_none() => Some(TypeExpr::Void),
            "dynamic" if module.is_none() => Some(TypeExpr::Dynamic),
            _ => None,
        };
        let mut expr = match special {
            Some(_) if !args.is_empty() => {
                return Err(TypeExprError(format!("'{}' takes no type arguments", name)));
            }
            Some(special) => special,
            None => TypeExpr::Named { module, name, args },
        };

        loop {
            if self.eat('[') {
                self.expect(']')?;
                expr = TypeExpr::Array(Box::new(expr));
            } else if self.eat('?') {
                expr = TypeExpr::Nullable(Box::new(expr));
            } else {
                break;
            }
            if matches!(expr_element(&expr), TypeExpr::Void) {
                return Err(TypeExprError("'void' cannot be an element type".to_string()));
            }
        }

        Ok(expr)
    }
}

fn expr_element(expr: &TypeExpr) -> &TypeExpr {
    match expr {
        TypeExpr::Array(inner) | TypeExpr::Nullable(inner) => expr_element(inner),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, args: Vec<TypeExpr>) -> TypeExpr {
        TypeExpr::Named {
            module: None,
            name: name.to_string(),
            args,
        }
    }

    #[test]
    fn test_simple_names() {
        assert_eq!(parse("void"), Ok(TypeExpr::Void));
        assert_eq!(parse(" dynamic "), Ok(TypeExpr::Dynamic));
        assert_eq!(parse("int"), Ok(named("int", vec![])));
        assert_eq!(parse("T"), Ok(named("T", vec![])));
    }

    #[test]
    fn test_generic_arguments() {
        assert_eq!(
            parse(
                "System.Collections.Generic.Dictionary`2<string, System.Threading.Tasks.Task`1<int>>"
            ),
            Ok(named(
                "System.Collections.Generic.Dictionary`2",
                vec![
                    named("string", vec![]),
                    named("System.Threading.Tasks.Task`1", vec![named("int", vec![])]),
                ]
            ))
        );
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(
            parse("string?[]"),
            Ok(TypeExpr::Array(Box::new(TypeExpr::Nullable(Box::new(
                named("string", vec![])
            )))))
        );
        assert_eq!(
            parse("Demo.Outer`1+Inner<int>?"),
            Ok(TypeExpr::Nullable(Box::new(named(
                "Demo.Outer`1+Inner",
                vec![named("int", vec![])]
            ))))
        );
    }

    #[test]
    fn test_module_prefix() {
        assert_eq!(
            parse("[Shim]System.Collections.Generic.IEnumerable`1<int>"),
            Ok(TypeExpr::Named {
                module: Some("Shim".to_string()),
                name: "System.Collections.Generic.IEnumerable`1".to_string(),
                args: vec![named("int", vec![])],
            })
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse("").is_err());
        assert!(parse("Task`1<int").is_err());
        assert!(parse("int int").is_err());
        assert!(parse("void[]").is_err());
        assert!(parse("void<int>").is_err());
        assert!(parse("[]int").is_err());
    }

    #[test]
    fn test_keyword_names() {
        assert_eq!(keyword_metadata_name("int"), Some("System.Int32"));
        assert_eq!(keyword_metadata_name("string"), Some("System.String"));
        assert_eq!(keyword_metadata_name("Int32"), None);
    }
}
