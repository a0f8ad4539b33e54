//! Conversion from engine parameter metadata to [`ParameterDefinition`].

use report_api_core::ParameterDefinition;
use tracing::warn;

use crate::engine::{ParameterContext, ParameterMetadata};

/// Maps one engine parameter to a [`ParameterDefinition`].
///
/// Default resolution runs inside a context scoped to `report`. Resolution
/// failures are logged and leave the default absent; they never fail the
/// mapping.
pub fn map_parameter<P>(param: &P, report: &P::Report) -> ParameterDefinition
where
    P: ParameterMetadata,
{
    let context = ParameterContext::new(report);
    let default_value = match param.resolve_default(&context) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                parameter = param.name(),
                error = %err,
                "Failed to resolve default value for parameter"
            );
            None
        }
    };

    let definition = if param.is_mandatory() {
        ParameterDefinition::required(param.name(), param.value_type())
    } else {
        ParameterDefinition::optional(param.name(), param.value_type())
    };
    definition.with_default(default_value)
}
