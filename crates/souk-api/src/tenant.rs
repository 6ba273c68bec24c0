//! Tenant resolution
//!
//! Derives the acting tenant from request metadata, independent of
//! authentication. Precedence, first match wins:
//!
//! 1. `X-Tenant-ID` header
//! 2. `X-Tenant` header (legacy alias)
//! 3. Hostname subdomain (label before the first dot)
//! 4. `/market/<slug>/...` path segment
//!
//! Falls back to the `default` sentinel when nothing matches. Routes that
//! declare tenant context mandatory reject the sentinel with 400 via
//! [`require_tenant`].

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{ApiError, AppState};

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const LEGACY_TENANT_HEADER: &str = "x-tenant";
pub const MARKET_PATH_SEGMENT: &str = "market";

/// Sentinel for requests carrying no tenant signal
pub const DEFAULT_TENANT: &str = "default";

/// Where the tenant reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantSource {
    Header,
    LegacyHeader,
    Subdomain,
    Path,
    Default,
}

/// Resolved tenant reference, attached to every request's extensions
///
/// `tenant` is either a tenant id or a subdomain slug; [`lookup_tenant_id`]
/// maps it to a concrete tenant id when one is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant: String,
    pub source: TenantSource,
}

impl TenantContext {
    pub fn is_default(&self) -> bool {
        self.source == TenantSource::Default
    }
}

/// Pure resolution over headers and path; no I/O
pub fn resolve_tenant(headers: &HeaderMap, path: &str) -> TenantContext {
    if let Some(tenant) = header_value(headers, TENANT_HEADER) {
        return TenantContext {
            tenant,
            source: TenantSource::Header,
        };
    }

    if let Some(tenant) = header_value(headers, LEGACY_TENANT_HEADER) {
        return TenantContext {
            tenant,
            source: TenantSource::LegacyHeader,
        };
    }

    if let Some(subdomain) = subdomain_of(headers) {
        return TenantContext {
            tenant: subdomain,
            source: TenantSource::Subdomain,
        };
    }

    if let Some(slug) = market_path_slug(path) {
        return TenantContext {
            tenant: slug,
            source: TenantSource::Path,
        };
    }

    TenantContext {
        tenant: DEFAULT_TENANT.to_string(),
        source: TenantSource::Default,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// `shop1.platform.example` -> `shop1`; bare hosts carry no tenant signal
fn subdomain_of(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok())?;
    let host = host.split(':').next().unwrap_or(host);

    let (label, rest) = host.split_once('.')?;
    if label.is_empty() || rest.is_empty() {
        return None;
    }
    Some(label.to_string())
}

/// `/market/shop1/products` -> `shop1`
fn market_path_slug(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == MARKET_PATH_SEGMENT {
            return segments.next().map(String::from);
        }
    }
    None
}

/// Middleware: resolve the tenant and attach it to the request scope
pub async fn resolve_tenant_layer(mut request: Request, next: Next) -> Response {
    let ctx = resolve_tenant(request.headers(), request.uri().path());
    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// Guard for routes where tenant context is mandatory
pub async fn require_tenant(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<TenantContext>() {
        Some(ctx) if !ctx.is_default() => Ok(next.run(request).await),
        _ => Err(ApiError::TenantRequired),
    }
}

/// Map a resolved tenant reference to a tenant id
///
/// Accepts a literal tenant id or a subdomain slug; either form is checked
/// against the tenant store. Returns `None` when no such tenant exists.
pub async fn lookup_tenant_id(
    state: &AppState,
    ctx: &TenantContext,
) -> Result<Option<Uuid>, ApiError> {
    if ctx.is_default() {
        return Ok(None);
    }

    let tenant = match Uuid::parse_str(&ctx.tenant) {
        Ok(id) => state.tenants.find_by_id(id).await,
        Err(_) => state.tenants.find_by_subdomain(&ctx.tenant).await,
    }
    .map_err(|e| ApiError::Unavailable(e.to_string()))?;

    Ok(tenant.map(|t| t.id))
}

/// Guard for tenant-enforced routes: the token's tenant must match the
/// tenant resolved from the request, whenever the request carries an
/// explicit tenant signal
pub async fn enforce_tenant_match(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let tenant_ctx = request.extensions().get::<TenantContext>().cloned();
    let auth = request.extensions().get::<souk_types::AuthContext>().cloned();

    if let (Some(tenant_ctx), Some(auth)) = (tenant_ctx, auth) {
        if !tenant_ctx.is_default() {
            match lookup_tenant_id(&state, &tenant_ctx).await? {
                Some(id) if id == auth.tenant_id => {}
                _ => {
                    tracing::info!(
                        user_id = %auth.user_id,
                        resolved = %tenant_ctx.tenant,
                        "request tenant does not match token tenant"
                    );
                    return Err(ApiError::Forbidden);
                }
            }
        }
    }

    Ok(next.run(request).await)
}
