use super::{
    errors::GenerationError,
    models::{generated_image::GeneratedImage, parameter_set::ParameterSet},
};

/// A provider output whose retrievable URL is only computed on request.
pub trait OutputLocation: Send + Sync {
    fn resolve_location(&self) -> Result<String, String>;
}

/// What the provider handed back: one output object, or an ordered collection.
pub enum ProviderOutput {
    Single(Box<dyn OutputLocation>),
    Many(Vec<Box<dyn OutputLocation>>),
}

impl ProviderOutput {
    fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(outputs) => outputs.len(),
        }
    }

    fn into_vec(self) -> Vec<Box<dyn OutputLocation>> {
        match self {
            Self::Single(output) => vec![output],
            Self::Many(outputs) => outputs,
        }
    }
}

/// Resolves every output exactly once, in order, into generated images.
///
/// At most `num_outputs` images are returned; fewer is a partial result, not
/// an error. Any resolution failure discards everything resolved so far.
pub fn normalize(
    output: ProviderOutput,
    params: &ParameterSet,
) -> Result<Vec<GeneratedImage>, GenerationError> {
    let requested = params.num_outputs as usize;
    let returned = output.len();

    if returned < requested {
        tracing::warn!(requested, returned, "provider returned fewer images than requested");
    } else if returned > requested {
        tracing::debug!(requested, returned, "ignoring extra provider outputs");
    }

    let (width, height) = params.aspect_ratio.render_dimensions();
    let mut images = Vec::with_capacity(requested.min(returned));

    for (index, location) in output.into_vec().into_iter().take(requested).enumerate() {
        let url = match location.resolve_location() {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(index, error = %e, "failed to resolve provider output");
                return Err(GenerationError::OutputResolutionFailed { index });
            }
        };

        images.push(GeneratedImage {
            url,
            output_format: params.output_format,
            width,
            height,
        });
    }

    Ok(images)
}
