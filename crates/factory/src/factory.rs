//! Component factory

use crate::error::UnregisteredType;
use crate::{ComponentRegistry, Error, Params, Result};
use loghub_logger::{Formatter, Processor, Sink};
use serde_json::Value;

/// Builds a single sink, formatter, or processor from its configuration
/// fragment.
///
/// The factory resolves the constructor through the registry and invokes
/// it with the parameter bag exactly as supplied; it performs no coercion
/// of parameter values. Both an unresolvable type name and a constructor
/// failure surface as the category-specific construction error.
pub struct ComponentFactory<'a> {
    registry: &'a ComponentRegistry,
}

fn bag(params: Option<&Params>) -> Value {
    match params {
        Some(params) => Value::Object(params.clone()),
        None => Value::Null,
    }
}

impl<'a> ComponentFactory<'a> {
    /// Create a factory resolving against `registry`
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Build a sink
    pub fn build_sink(&self, type_name: &str, params: Option<&Params>) -> Result<Box<dyn Sink>> {
        let ctor = self
            .registry
            .sink_ctor(type_name)
            .ok_or_else(|| Error::HandlerConstruction {
                name: type_name.to_string(),
                source: Box::new(UnregisteredType),
            })?;
        ctor(bag(params)).map_err(|source| Error::HandlerConstruction {
            name: type_name.to_string(),
            source,
        })
    }

    /// Build a formatter
    pub fn build_formatter(
        &self,
        type_name: &str,
        params: Option<&Params>,
    ) -> Result<Box<dyn Formatter>> {
        let ctor = self
            .registry
            .formatter_ctor(type_name)
            .ok_or_else(|| Error::FormatterConstruction {
                name: type_name.to_string(),
                source: Box::new(UnregisteredType),
            })?;
        ctor(bag(params)).map_err(|source| Error::FormatterConstruction {
            name: type_name.to_string(),
            source,
        })
    }

    /// Build a processor
    pub fn build_processor(
        &self,
        type_name: &str,
        params: Option<&Params>,
    ) -> Result<Box<dyn Processor>> {
        let ctor = self
            .registry
            .processor_ctor(type_name)
            .ok_or_else(|| Error::ProcessorConstruction {
                name: type_name.to_string(),
                source: Box::new(UnregisteredType),
            })?;
        ctor(bag(params)).map_err(|source| Error::ProcessorConstruction {
            name: type_name.to_string(),
            source,
        })
    }
}
