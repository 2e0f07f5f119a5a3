//! Binding of environments to interpreters.

use crate::environment::EnvironmentRecord;
use crate::error::{Error, Result};
use crate::interpreter::Interpreter;

/// Group `environments` under the interpreters they request.
///
/// The returned interpreters are a fresh copy of `interpreters`, in the same
/// order, with their environment lists populated. Each list keeps the order in
/// which its environments appear in `environments`, and never holds two
/// environments with the same name.
///
/// An environment whose basepython has no exact match goes to the `fallback`
/// interpreter when one is given, and is dropped otherwise.
///
/// # Errors
///
/// Returns [`Error::UnknownFallback`] if `fallback` is not the basepython of any
/// entry in `interpreters`. Nothing is bound in that case.
pub fn bind(
    interpreters: &[Interpreter],
    environments: &[EnvironmentRecord],
    fallback: Option<&str>,
) -> Result<Vec<Interpreter>> {
    let fallback_index = fallback
        .map(|name| {
            position_of(interpreters, name).ok_or_else(|| Error::unknown_fallback(name))
        })
        .transpose()?;

    let mut bound = interpreters.to_vec();

    for environment in environments {
        let index = match position_of(&bound, environment.basepython()) {
            Some(index) => index,
            None => {
                let Some(index) = fallback_index else {
                    tracing::debug!(
                        environment = environment.name(),
                        basepython = environment.basepython(),
                        "Dropping environment with unknown basepython and no fallback"
                    );
                    continue;
                };
                tracing::debug!(
                    environment = environment.name(),
                    basepython = environment.basepython(),
                    fallback = bound[index].source(),
                    "Binding environment to fallback interpreter"
                );
                index
            }
        };

        if !bound[index].add_environment(environment.clone()) {
            tracing::trace!(
                environment = environment.name(),
                "Environment already bound, skipping duplicate"
            );
        }
    }

    Ok(bound)
}

fn position_of(interpreters: &[Interpreter], source: &str) -> Option<usize> {
    interpreters.iter().position(|i| i.source() == source)
}
