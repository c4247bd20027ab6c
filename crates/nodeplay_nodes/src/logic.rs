// SPDX-License-Identifier: MIT OR Apache-2.0
//! Logic nodes: branching, comparison and variables.

use nodeplay_graph::{NodeCategory, NodeDefinition, NodeOutput, NodeRegistry, Port, PortType, Value};
use std::cmp::Ordering;

/// Variable name used when a node does not configure one
pub const DEFAULT_VARIABLE: &str = "variable";

/// Comparison operator of the `Compare` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
}

impl CompareOp {
    /// Parse an authored operator; unknown operators yield `None`
    pub fn parse(op: &str) -> Option<Self> {
        Some(match op.trim() {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            ">" => Self::Greater,
            "<" => Self::Less,
            ">=" => Self::GreaterOrEqual,
            "<=" => Self::LessOrEqual,
            _ => return None,
        })
    }

    /// Apply the operator with loose value semantics
    pub fn apply(&self, a: &Value, b: &Value) -> bool {
        let ordering = a.loose_cmp(b);
        match self {
            Self::Equal => a.loose_eq(b),
            Self::NotEqual => !a.loose_eq(b),
            Self::Greater => ordering == Some(Ordering::Greater),
            Self::Less => ordering == Some(Ordering::Less),
            Self::GreaterOrEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Self::LessOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        }
    }
}

/// Register the logic nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(
        NodeDefinition::new("If", NodeCategory::Logic, |_ctx, inputs, node| {
            if inputs.bool_or("condition", node.node, false) {
                Some(NodeOutput::fire("true"))
            } else {
                Some(NodeOutput::fire("false"))
            }
        })
        .with_description("Branches on a condition")
        .with_input(Port::control("exec"))
        .with_input(Port::input("condition", PortType::Boolean))
        .with_output(Port::control("true"))
        .with_output(Port::control("false")),
    );

    registry.register(
        NodeDefinition::new("SetVar", NodeCategory::Logic, |ctx, inputs, node| {
            let name = node.node.text("varName").unwrap_or(DEFAULT_VARIABLE);
            let value = inputs.value("value", node.node).cloned().unwrap_or_default();
            ctx.set_variable(name, value);
            Some(NodeOutput::fire("exec"))
        })
        .with_label("Set Variable")
        .with_input(Port::control("exec"))
        .with_input(Port::input("value", PortType::Any))
        .with_output(Port::control("exec"))
        .with_side_effects(),
    );

    registry.register(
        NodeDefinition::new("AddVar", NodeCategory::Logic, |ctx, inputs, node| {
            let name = node.node.text("varName").unwrap_or(DEFAULT_VARIABLE);
            let amount = inputs.number_or("value", node.node, 1.0);
            let current = ctx
                .variable(name)
                .and_then(Value::as_number)
                .unwrap_or(0.0);
            let result = current + amount;
            ctx.set_variable(name, result);
            Some(NodeOutput::fire("exec").with("result", result))
        })
        .with_label("Add to Variable")
        .with_input(Port::control("exec"))
        .with_input(Port::input("value", PortType::Number).with_default(1.0))
        .with_output(Port::control("exec"))
        .with_output(Port::output("result", PortType::Number))
        .with_side_effects(),
    );

    registry.register(
        NodeDefinition::new("GetVariable", NodeCategory::Logic, |ctx, _inputs, node| {
            let name = node.node.text("variable").unwrap_or(DEFAULT_VARIABLE);
            let value = ctx.variable(name).cloned().unwrap_or_default();
            Some(NodeOutput::fire("exec").with("value", value))
        })
        .with_label("Get Variable")
        .with_description("Reads a variable; absent variables read as 0")
        .with_input(Port::control("exec"))
        .with_output(Port::control("exec"))
        .with_output(Port::output("value", PortType::Any)),
    );

    registry.register(
        NodeDefinition::new("Compare", NodeCategory::Logic, |_ctx, inputs, node| {
            let a = inputs.value("a", node.node).cloned().unwrap_or_default();
            let b = inputs.value("b", node.node).cloned().unwrap_or_default();
            let op = node.node.text("operator").unwrap_or("==");
            let result = match CompareOp::parse(op) {
                Some(op) => op.apply(&a, &b),
                None => {
                    tracing::debug!("Compare {}: unknown operator {op}", node.id());
                    false
                }
            };

            Some(
                NodeOutput::new()
                    .with("result", result)
                    .with("equal", CompareOp::Equal.apply(&a, &b))
                    .with("greater", CompareOp::Greater.apply(&a, &b))
                    .with("less", CompareOp::Less.apply(&a, &b)),
            )
        })
        .with_input(Port::input("a", PortType::Any))
        .with_input(Port::input("b", PortType::Any))
        .with_output(Port::output("result", PortType::Boolean))
        .with_output(Port::output("equal", PortType::Boolean).with_name("=="))
        .with_output(Port::output("greater", PortType::Boolean).with_name(">"))
        .with_output(Port::output("less", PortType::Boolean).with_name("<")),
    );
}
