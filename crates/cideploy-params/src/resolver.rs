//! Evaluation of directives against the template schema, the override
//! table, and the zone lister.

use cideploy_common::constants::AUDIT_TARGET;
use cideploy_common::error::Result;
use cideploy_common::types::ParameterEntry;
use futures::future::try_join_all;

use crate::directive::Directive;
use crate::generate;
use crate::overrides::OverrideTable;
use crate::schema::TemplateSchema;
use crate::zones::ZoneLister;

/// Read-only inputs shared by every resolution in a parameter set.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Template parameter declarations.
    pub schema: &'a TemplateSchema,
    /// User and synthetic overrides.
    pub overrides: &'a OverrideTable,
    /// Source of availability zones for `$[cd_genaz]`.
    pub zones: &'a dyn ZoneLister,
}

impl<'a> ResolveContext<'a> {
    /// Bundles the resolution inputs.
    #[must_use]
    pub fn new(
        schema: &'a TemplateSchema,
        overrides: &'a OverrideTable,
        zones: &'a dyn ZoneLister,
    ) -> Self {
        Self {
            schema,
            overrides,
            zones,
        }
    }
}

/// Computes the final value of one parameter.
///
/// Missing defaults and missing overrides resolve to `""`. Literals are
/// returned exactly as written, including surrounding whitespace.
///
/// # Errors
///
/// Returns an error if zone listing fails or too few zones are available.
pub async fn resolve_value(key: &str, raw: &str, ctx: &ResolveContext<'_>) -> Result<String> {
    let directive = Directive::parse(raw);
    tracing::debug!(key, ?directive, generated = directive.is_generated(), "resolving parameter");

    let value = match directive {
        Directive::UseTemplateDefault => ctx.schema.default_for(key).unwrap_or_default(),
        Directive::UseOverride => ctx.overrides.get(key).unwrap_or_default().to_string(),
        Directive::RandomChars { length } => generate::generate_random_string(length, ""),
        Directive::GenerateAzs { count } => {
            let available = ctx.zones.list_zones().await?;
            generate::select_availability_zones(count, &available, ctx.zones.region())?
        }
        Directive::GeneratePassword { length, strong } => {
            let password = generate::generate_password(length, strong);
            tracing::info!(target: AUDIT_TARGET, parameter = key, password = %password, "generated password");
            password
        }
        Directive::Literal => raw.to_string(),
    };
    Ok(value)
}

/// Resolves a single entry.
///
/// An entry that already carries a resolved value is returned unchanged.
///
/// # Errors
///
/// Returns an error if [`resolve_value`] fails.
pub async fn resolve_entry(entry: ParameterEntry, ctx: &ResolveContext<'_>) -> Result<ParameterEntry> {
    if entry.is_resolved() {
        return Ok(entry);
    }
    let value = resolve_value(&entry.key, &entry.raw_value, ctx).await?;
    Ok(entry.resolved(value))
}

/// Resolves every entry concurrently, preserving document order.
///
/// The batch is all-or-nothing: the first failure is returned and every
/// partial result is dropped.
///
/// # Errors
///
/// Returns the first error produced by any entry.
pub async fn resolve_all(
    entries: Vec<ParameterEntry>,
    ctx: &ResolveContext<'_>,
) -> Result<Vec<ParameterEntry>> {
    let count = entries.len();
    let resolved = try_join_all(entries.into_iter().map(|entry| resolve_entry(entry, ctx))).await?;
    tracing::info!(count, "parameter set resolved");
    Ok(resolved)
}
