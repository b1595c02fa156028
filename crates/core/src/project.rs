//! AST to context-value projection.
//!
//! Converts any AST node into the generic, nested, order-preserving value
//! the template renderer consumes. The transform is purely structural:
//! no evaluation, no type inference, no reordering. Every map carries a
//! `"kind"` discriminator naming its variant, and the projection is total
//! over the closed AST set.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::ast::{Block, Expr, Member, Stmt, TemplatePart};
use crate::config::BuildSetting;

/// The closed projection target: a string, an ordered list, or an
/// insertion-ordered string-keyed map. Numbers and booleans project as
/// their source text, so the renderer only ever sees these three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Text(String),
    List(Vec<ContextValue>),
    Map(Vec<(String, ContextValue)>),
}

impl ContextValue {
    pub fn text(s: impl Into<String>) -> Self {
        ContextValue::Text(s.into())
    }

    /// Look up a key in a map value.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        match self {
            ContextValue::Map(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContextValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ContextValue]> {
        match self {
            ContextValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// The `"kind"` discriminator of a map value.
    pub fn kind(&self) -> Option<&str> {
        self.get("kind").and_then(ContextValue::as_text)
    }
}

impl Serialize for ContextValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContextValue::Text(s) => serializer.serialize_str(s),
            ContextValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ContextValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

fn node(kind: &str, entries: Vec<(&str, ContextValue)>) -> ContextValue {
    let mut all = Vec::with_capacity(entries.len() + 1);
    all.push(("kind".to_owned(), ContextValue::text(kind)));
    for (k, v) in entries {
        all.push((k.to_owned(), v));
    }
    ContextValue::Map(all)
}

/// Projects AST nodes, parameterized by the build setting whose
/// separators it reads (but does not define).
pub struct Projector<'a> {
    settings: &'a BuildSetting,
}

impl<'a> Projector<'a> {
    pub fn new(settings: &'a BuildSetting) -> Self {
        Projector { settings }
    }

    pub fn project_block(&self, block: &Block) -> ContextValue {
        node(
            "block",
            vec![
                (
                    "separator",
                    ContextValue::text(self.settings.block_separator()),
                ),
                (
                    "statements",
                    ContextValue::List(
                        block.statements.iter().map(|s| self.project_stmt(s)).collect(),
                    ),
                ),
            ],
        )
    }

    pub fn project_stmt(&self, stmt: &Stmt) -> ContextValue {
        match stmt {
            Stmt::Model { name, members } => node(
                "model",
                vec![
                    ("name", ContextValue::text(name)),
                    (
                        "members",
                        ContextValue::List(
                            members.iter().map(|m| self.project_member(m)).collect(),
                        ),
                    ),
                ],
            ),
            Stmt::Variable {
                name,
                type_name,
                value,
            } => {
                let mut entries = vec![("name", ContextValue::text(name))];
                if let Some(t) = type_name {
                    entries.push(("type", ContextValue::text(t)));
                }
                entries.push(("value", self.project_expr(value)));
                node("variable", entries)
            }
            Stmt::Mutation { target, value } => node(
                "mutation",
                vec![
                    ("target", ContextValue::text(target)),
                    ("value", self.project_expr(value)),
                ],
            ),
            Stmt::Conditional {
                condition,
                body,
                else_body,
            } => {
                let mut entries = vec![
                    ("condition", self.project_expr(condition)),
                    ("body", self.project_block(body)),
                ];
                if let Some(e) = else_body {
                    entries.push(("else", self.project_block(e)));
                }
                node("conditional", entries)
            }
            Stmt::Loop { condition, body } => node(
                "loop",
                vec![
                    ("condition", self.project_expr(condition)),
                    ("body", self.project_block(body)),
                ],
            ),
            Stmt::Block(block) => self.project_block(block),
            Stmt::Expression(expr) => node(
                "expressionStatement",
                vec![("expression", self.project_expr(expr))],
            ),
        }
    }

    fn project_member(&self, member: &Member) -> ContextValue {
        match member {
            Member::Property {
                modifiers,
                name,
                type_name,
                default,
            } => {
                let mut entries = vec![
                    ("name", ContextValue::text(name)),
                    ("type", ContextValue::text(type_name)),
                    ("private", bool_text(modifiers.is_private)),
                    ("static", bool_text(modifiers.is_static)),
                ];
                if let Some(d) = default {
                    entries.push(("default", self.project_expr(d)));
                }
                node("property", entries)
            }
            Member::Function {
                modifiers,
                name,
                params,
                return_type,
                body,
            } => {
                let mut entries = vec![
                    ("name", ContextValue::text(name)),
                    ("private", bool_text(modifiers.is_private)),
                    ("static", bool_text(modifiers.is_static)),
                    (
                        "params",
                        ContextValue::List(
                            params
                                .iter()
                                .map(|p| {
                                    node(
                                        "param",
                                        vec![
                                            ("name", ContextValue::text(&p.name)),
                                            ("type", ContextValue::text(&p.type_name)),
                                        ],
                                    )
                                })
                                .collect(),
                        ),
                    ),
                ];
                if let Some(r) = return_type {
                    entries.push(("returnType", ContextValue::text(r)));
                }
                entries.push(("body", self.project_block(body)));
                node("function", entries)
            }
        }
    }

    pub fn project_expr(&self, expr: &Expr) -> ContextValue {
        match expr {
            Expr::Int(n) => node("intLiteral", vec![("value", ContextValue::text(n.to_string()))]),
            Expr::Float(f) => node("floatLiteral", vec![("value", ContextValue::text(f))]),
            Expr::Str(s) => node("stringLiteral", vec![("value", ContextValue::text(s))]),
            Expr::Bool(b) => node("boolLiteral", vec![("value", bool_text(*b))]),
            Expr::Ident(name) => node("identifier", vec![("name", ContextValue::text(name))]),
            Expr::TemplatedStr(parts) => node(
                "templatedString",
                vec![(
                    "parts",
                    ContextValue::List(
                        parts
                            .iter()
                            .map(|p| match p {
                                TemplatePart::Fragment(text) => node(
                                    "stringFragment",
                                    vec![("text", ContextValue::text(text))],
                                ),
                                TemplatePart::Expr(e) => self.project_expr(e),
                            })
                            .collect(),
                    ),
                )],
            ),
            Expr::ListLiteral(elements) => node(
                "listLiteral",
                vec![(
                    "elements",
                    ContextValue::List(
                        elements.iter().map(|e| self.project_expr(e)).collect(),
                    ),
                )],
            ),
            Expr::ListAccess { name, index } => node(
                "listAccess",
                vec![
                    ("name", ContextValue::text(name)),
                    ("index", self.project_expr(index)),
                ],
            ),
            Expr::Call { name, args } => node(
                "functionCall",
                vec![
                    ("name", ContextValue::text(name)),
                    (
                        "arguments",
                        ContextValue::List(args.iter().map(|a| self.project_expr(a)).collect()),
                    ),
                ],
            ),
            Expr::Prefix { op, operand } => node(
                "prefix",
                vec![
                    ("operator", ContextValue::text(op)),
                    ("operand", self.project_expr(operand)),
                ],
            ),
            Expr::Grouping(inner) => {
                node("grouping", vec![("inner", self.project_expr(inner))])
            }
            Expr::Operation { left, op, right } => node(
                "operation",
                vec![
                    ("left", self.project_expr(left)),
                    ("operator", ContextValue::text(op)),
                    ("right", self.project_expr(right)),
                ],
            ),
        }
    }
}

fn bool_text(b: bool) -> ContextValue {
    ContextValue::text(if b { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser;

    fn settings() -> BuildSetting {
        BuildSetting::default()
    }

    fn project_source(src: &str) -> ContextValue {
        let tokens = tokenize(src, "test.mqt").unwrap();
        let block = parser::parse_file(&tokens, "test.mqt").unwrap();
        let s = settings();
        Projector::new(&s).project_block(&block)
    }

    fn project_expr_source(src: &str) -> ContextValue {
        let tokens = tokenize(src, "test.mqt").unwrap();
        let mut ctx = crate::diag::ParseContext::new("test.mqt");
        let expr = parser::parse_expression(&tokens, &mut ctx).unwrap();
        let s = settings();
        Projector::new(&s).project_expr(&expr)
    }

    #[test]
    fn every_map_carries_a_kind_discriminator() {
        let v = project_source("let x = 1 plus 2");
        assert_eq!(v.kind(), Some("block"));
        let stmts = v.get("statements").unwrap().as_list().unwrap();
        assert_eq!(stmts[0].kind(), Some("variable"));
        assert_eq!(stmts[0].get("value").unwrap().kind(), Some("operation"));
    }

    #[test]
    fn operation_projects_left_operator_right() {
        let v = project_expr_source("1 plus 2");
        assert_eq!(v.kind(), Some("operation"));
        assert_eq!(
            v.get("operator").unwrap().as_text(),
            Some("plus")
        );
        assert_eq!(v.get("left").unwrap().kind(), Some("intLiteral"));
        assert_eq!(
            v.get("left").unwrap().get("value").unwrap().as_text(),
            Some("1")
        );
    }

    #[test]
    fn function_call_projects_name_and_ordered_arguments() {
        let v = project_expr_source("foo(1, 2, 3)");
        assert_eq!(v.kind(), Some("functionCall"));
        assert_eq!(v.get("name").unwrap().as_text(), Some("foo"));
        let args = v.get("arguments").unwrap().as_list().unwrap();
        assert_eq!(args.len(), 3);
        for (i, arg) in args.iter().enumerate() {
            assert_eq!(arg.kind(), Some("intLiteral"));
            assert_eq!(
                arg.get("value").unwrap().as_text(),
                Some((i + 1).to_string().as_str())
            );
        }
    }

    #[test]
    fn empty_list_projects_to_an_empty_list() {
        let v = project_expr_source("[ ]");
        assert_eq!(v.kind(), Some("listLiteral"));
        assert!(v.get("elements").unwrap().as_list().unwrap().is_empty());
    }

    #[test]
    fn list_access_projects_name_and_index() {
        let v = project_expr_source("myList[0]");
        assert_eq!(v.kind(), Some("listAccess"));
        assert_eq!(v.get("name").unwrap().as_text(), Some("myList"));
        let index = v.get("index").unwrap();
        assert_eq!(index.kind(), Some("intLiteral"));
        assert_eq!(index.get("value").unwrap().as_text(), Some("0"));
    }

    #[test]
    fn grouping_survives_projection() {
        let v = project_expr_source("(1 plus 2) times 3");
        assert_eq!(v.get("left").unwrap().kind(), Some("grouping"));
    }

    #[test]
    fn templated_string_parts_alternate_in_source_order() {
        let v = project_expr_source(r#""a ${1 plus 2} b""#);
        assert_eq!(v.kind(), Some("templatedString"));
        let parts = v.get("parts").unwrap().as_list().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].kind(), Some("stringFragment"));
        assert_eq!(parts[0].get("text").unwrap().as_text(), Some("a "));
        assert_eq!(parts[1].kind(), Some("operation"));
        assert_eq!(parts[2].get("text").unwrap().as_text(), Some(" b"));
    }

    #[test]
    fn block_carries_the_configured_separator() {
        let mut s = settings();
        s.separators.insert("block".to_owned(), ";\n".to_owned());
        let tokens = tokenize("let x = 1", "test.mqt").unwrap();
        let block = parser::parse_file(&tokens, "test.mqt").unwrap();
        let v = Projector::new(&s).project_block(&block);
        assert_eq!(v.get("separator").unwrap().as_text(), Some(";\n"));
    }

    #[test]
    fn serializes_with_insertion_order_preserved() {
        let v = project_expr_source("1 plus 2");
        let json = serde_json::to_string(&v).unwrap();
        let left = json.find("\"left\"").unwrap();
        let operator = json.find("\"operator\"").unwrap();
        let right = json.find("\"right\"").unwrap();
        assert!(json.starts_with("{\"kind\":\"operation\""));
        assert!(left < operator && operator < right);
    }

    #[test]
    fn model_members_project_with_modifiers() {
        let v = project_source(
            "model Person {\n    name: text\n    private static id: text = \"x\"\n}",
        );
        let stmts = v.get("statements").unwrap().as_list().unwrap();
        let members = stmts[0].get("members").unwrap().as_list().unwrap();
        assert_eq!(members[0].get("private").unwrap().as_text(), Some("false"));
        assert_eq!(members[1].get("private").unwrap().as_text(), Some("true"));
        assert_eq!(members[1].get("static").unwrap().as_text(), Some("true"));
        assert_eq!(members[1].get("default").unwrap().kind(), Some("stringLiteral"));
    }
}
