//! Errors - エラー型と分類
//!
//! render は再試行しません。ここにあるエラーはすべて呼び出し元へ即座に返されます。

use thiserror::Error;

/// ErrorKind はエラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 必須の拡張操作（create_element / update）が実装されていない
    NotImplemented,
    /// コンポーネントが契約を破った（要素でないノード、root の種類の変化）
    ContractViolation,
    /// コンポーネント自身のエラー
    Component,
}

/// ComponentError は render から返るエラー
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("stencil: {operation} should be implemented")]
    NotImplemented { operation: &'static str },

    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),

    #[error("component failed: {0}")]
    Component(String),
}

impl ComponentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComponentError::NotImplemented { .. } => ErrorKind::NotImplemented,
            ComponentError::ContractViolation(_) => ErrorKind::ContractViolation,
            ComponentError::Component(_) => ErrorKind::Component,
        }
    }
}

/// A concrete component broke the construction contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("stencil: create_element should return an element node, got {found}")]
    NotAnElement { found: String },

    #[error("stencil: root node kinds cannot differ between re-renders (expected <{expected}>, found <{found}>)")]
    RootKindChanged { expected: String, found: String },
}

/// TreeError はノードツリー操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("a node cannot be inserted into itself or one of its descendants")]
    Cycle,

    #[error("text nodes cannot have children")]
    NotAContainer,

    #[error("the node is not a child of the given parent")]
    NotAChild,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violation_converts_into_component_error() {
        let err: ComponentError = ContractViolation::RootKindChanged {
            expected: "div".to_string(),
            found: "span".to_string(),
        }
        .into();

        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert_eq!(
            err.to_string(),
            "stencil: root node kinds cannot differ between re-renders (expected <div>, found <span>)"
        );
    }

    #[test]
    fn not_implemented_names_the_operation() {
        let err = ComponentError::NotImplemented {
            operation: "create_element",
        };
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        assert_eq!(err.to_string(), "stencil: create_element should be implemented");
    }
}
