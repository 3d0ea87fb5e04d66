//! ZON's node algebra: `struct{fields}`, `array{elements}` (the same
//! `.{ ... }` syntax, disambiguated by whether its members are fields),
//! `field{name,value}`, and the scalar/undefined leaves.

use crate::ast::ast_node;
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(Root, Root);
ast_node!(Struct, Struct);
ast_node!(Array, Array);
ast_node!(Field, Field);
ast_node!(StringNode, StringNode);
ast_node!(NumberNode, NumberNode);
ast_node!(BooleanNode, BooleanNode);
ast_node!(NullNode, NullNode);
ast_node!(UndefinedNode, UndefinedNode);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Struct(Struct),
    Array(Array),
    String(StringNode),
    Number(NumberNode),
    Boolean(BooleanNode),
    Null(NullNode),
    Undefined(UndefinedNode),
}

impl Value {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Struct => Struct::cast(node).map(Value::Struct),
            SyntaxKind::Array => Array::cast(node).map(Value::Array),
            SyntaxKind::StringNode => StringNode::cast(node).map(Value::String),
            SyntaxKind::NumberNode => NumberNode::cast(node).map(Value::Number),
            SyntaxKind::BooleanNode => BooleanNode::cast(node).map(Value::Boolean),
            SyntaxKind::NullNode => NullNode::cast(node).map(Value::Null),
            SyntaxKind::UndefinedNode => UndefinedNode::cast(node).map(Value::Undefined),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Value::Struct(n) => n.syntax(),
            Value::Array(n) => n.syntax(),
            Value::String(n) => n.syntax(),
            Value::Number(n) => n.syntax(),
            Value::Boolean(n) => n.syntax(),
            Value::Null(n) => n.syntax(),
            Value::Undefined(n) => n.syntax(),
        }
    }
}

impl Root {
    pub fn value(&self) -> Option<Value> {
        self.syntax().children().find_map(Value::cast)
    }
}

impl Struct {
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.syntax().children().filter_map(Field::cast)
    }
}

impl Array {
    pub fn elements(&self) -> impl Iterator<Item = Value> + '_ {
        self.syntax().children().filter_map(Value::cast)
    }
}

impl Field {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::FieldName)
    }

    pub fn value(&self) -> Option<Value> {
        self.syntax().children().find_map(Value::cast)
    }
}

macro_rules! scalar_token {
    ($name:ident, $token_kind:ident) => {
        impl $name {
            pub fn token(&self) -> Option<SyntaxToken> {
                self.syntax()
                    .children_with_tokens()
                    .filter_map(|it| it.into_token())
                    .find(|t| t.kind() == SyntaxKind::$token_kind)
            }
        }
    };
}

scalar_token!(StringNode, StringLiteral);
scalar_token!(NumberNode, NumberLiteral);
scalar_token!(NullNode, KwNull);
scalar_token!(UndefinedNode, KwUndefined);

impl BooleanNode {
    pub fn value(&self) -> Option<bool> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find_map(|t| match t.kind() {
                SyntaxKind::KwTrue => Some(true),
                SyntaxKind::KwFalse => Some(false),
                _ => None,
            })
    }
}
