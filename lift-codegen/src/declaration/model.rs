//! Declaration model for generated extension methods.

use crate::builder::{CodeFragment, Renderable};

/// A generated extension method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMethod {
    /// Method attributes, without brackets.
    pub attributes: Vec<String>,
    /// Return attributes, without brackets or target.
    pub return_attributes: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub return_type: String,
    pub name: String,
    pub type_parameters: Vec<TypeParamSpec>,
    /// Receiver first, never empty.
    pub parameters: Vec<ParamSpec>,
    pub body: Vec<Statement>,
}

/// A type parameter with its constraint clause items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamSpec {
    pub name: String,
    pub constraints: Vec<String>,
}

/// A parameter of the generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub attributes: Vec<String>,
    /// `this` for the receiver, `params` for parameter arrays.
    pub modifier: Option<&'static str>,
    pub ty: String,
    pub name: String,
    pub default: Option<String>,
}

impl ParamSpec {
    fn render(&self) -> String {
        let mut out = String::new();
        for attribute in &self.attributes {
            out.push('[');
            out.push_str(attribute);
            out.push_str("] ");
        }
        if let Some(modifier) = self.modifier {
            out.push_str(modifier);
            out.push(' ');
        }
        out.push_str(&self.ty);
        out.push(' ');
        out.push_str(&self.name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }
}

/// A statement of a generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `var local = (Cast) await receiver;`
    AwaitReceiver {
        local: String,
        cast: Option<String>,
        receiver: String,
    },
    /// `[await] foreach (var item in source) { yield return item; }`
    Relay {
        is_async: bool,
        item: String,
        source: String,
    },
    /// `return await call;`
    ReturnAwait(String),
    /// `await call;`
    Await(String),
    /// `return call;`
    Return(String),
    /// `call;`
    Expression(String),
}

impl Renderable for Statement {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Statement::AwaitReceiver {
                local,
                cast,
                receiver,
            } => {
                let cast = cast
                    .as_ref()
                    .map(|c| format!("({}) ", c))
                    .unwrap_or_default();
                vec![CodeFragment::line(format!(
                    "var {} = {}await {};",
                    local, cast, receiver
                ))]
            }
            Statement::Relay {
                is_async,
                item,
                source,
            } => {
                let keyword = if *is_async { "await foreach" } else { "foreach" };
                vec![
                    CodeFragment::line(format!("{} (var {} in {})", keyword, item, source)),
                    CodeFragment::scope(vec![CodeFragment::line(format!(
                        "yield return {};",
                        item
                    ))]),
                ]
            }
            Statement::ReturnAwait(call) => {
                vec![CodeFragment::line(format!("return await {};", call))]
            }
            Statement::Await(call) => vec![CodeFragment::line(format!("await {};", call))],
            Statement::Return(call) => vec![CodeFragment::line(format!("return {};", call))],
            Statement::Expression(call) => vec![CodeFragment::line(format!("{};", call))],
        }
    }
}

impl ExtensionMethod {
    /// The signature line, from modifiers to the closing parenthesis.
    pub fn signature(&self) -> String {
        let mut signature = String::new();
        for modifier in &self.modifiers {
            signature.push_str(modifier);
            signature.push(' ');
        }
        signature.push_str(&self.return_type);
        signature.push(' ');
        signature.push_str(&self.name);

        if !self.type_parameters.is_empty() {
            let names: Vec<&str> = self.type_parameters.iter().map(|t| t.name.as_str()).collect();
            signature.push('<');
            signature.push_str(&names.join(", "));
            signature.push('>');
        }

        let params: Vec<String> = self.parameters.iter().map(ParamSpec::render).collect();
        signature.push('(');
        signature.push_str(&params.join(", "));
        signature.push(')');
        signature
    }
}

impl Renderable for ExtensionMethod {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .attributes
            .iter()
            .map(|a| CodeFragment::line(format!("[{}]", a)))
            .chain(
                self.return_attributes
                    .iter()
                    .map(|a| CodeFragment::line(format!("[return: {}]", a))),
            )
            .collect();

        fragments.push(CodeFragment::line(self.signature()));

        let clauses: Vec<CodeFragment> = self
            .type_parameters
            .iter()
            .filter(|t| !t.constraints.is_empty())
            .map(|t| CodeFragment::line(format!("where {} : {}", t.name, t.constraints.join(", "))))
            .collect();
        if !clauses.is_empty() {
            fragments.push(CodeFragment::indented(clauses));
        }

        fragments.push(CodeFragment::scope(
            self.body.iter().flat_map(Renderable::to_fragments).collect(),
        ));
        fragments
    }
}
