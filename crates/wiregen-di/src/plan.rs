//! Construction plans produced by the resolver

use serde::{Deserialize, Serialize};

use crate::Argument;

/// How a single constructor parameter gets its value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// A fixed value: call-time option, configured override, default or `null`
    Literal(Argument),
    /// Construct another type in place
    NestedPlan(Box<ConstructionPlan>),
    /// Ask the host container for an instance of this type
    DeferredLookup(String),
}

/// A resolved parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub name: String,
    pub position: usize,
    pub binding: Binding,
}

/// Fully determined recipe for instantiating one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionPlan {
    /// The name the caller asked for, before aliases and preferences
    pub requested: String,
    /// The concrete type that gets instantiated
    pub type_name: String,
    pub bindings: Vec<ParameterBinding>,
}

impl ConstructionPlan {
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.binding)
    }

    /// Types that this plan looks up from the container, including nested plans
    pub fn deferred_lookups(&self) -> Vec<&str> {
        let mut lookups = Vec::new();
        self.collect_lookups(&mut lookups);
        lookups
    }

    fn collect_lookups<'a>(&'a self, out: &mut Vec<&'a str>) {
        for binding in &self.bindings {
            match &binding.binding {
                Binding::DeferredLookup(type_name) => out.push(type_name),
                Binding::NestedPlan(plan) => plan.collect_lookups(out),
                Binding::Literal(_) => {}
            }
        }
    }
}
