//! /docs 端点：静态 API 文档页

use axum::response::Html;

const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>FIT-AI API</title>
  <style>
    body { font-family: sans-serif; margin: 2rem auto; max-width: 48rem; line-height: 1.5; }
    code { background: #f0f0f0; padding: 0.1rem 0.3rem; border-radius: 3px; }
    td, th { text-align: left; padding: 0.25rem 0.75rem 0.25rem 0; vertical-align: top; }
  </style>
</head>
<body>
  <h1>FIT-AI API</h1>
  <p>JSON over HTTP. Protected endpoints expect <code>Authorization: Bearer &lt;access token&gt;</code>.
     Access tokens expire after 15 minutes; exchange the refresh token at
     <code>/api/v1/auth/refresh</code> for a new pair. Refresh tokens are single-use.</p>
  <table>
    <tr><th>Endpoint</th><th>Auth</th><th>Description</th></tr>
    <tr><td><code>GET /api/v1/health</code></td><td>-</td><td>Liveness probe</td></tr>
    <tr><td><code>GET /api/v1/ready</code></td><td>-</td><td>Readiness probe (MongoDB ping)</td></tr>
    <tr><td><code>POST /api/v1/auth/register</code></td><td>-</td><td>Create account, returns token pair</td></tr>
    <tr><td><code>POST /api/v1/auth/login</code></td><td>-</td><td>Returns token pair</td></tr>
    <tr><td><code>POST /api/v1/auth/refresh</code></td><td>-</td><td>Rotate refresh token</td></tr>
    <tr><td><code>POST /api/v1/auth/logout</code></td><td>bearer</td><td>Revoke presented refresh token</td></tr>
    <tr><td><code>POST /api/v1/auth/logout-all</code></td><td>bearer</td><td>Revoke all refresh tokens</td></tr>
    <tr><td><code>GET /api/v1/users/me</code></td><td>bearer</td><td>Current user profile</td></tr>
    <tr><td><code>POST /api/v1/users/onboarding</code></td><td>bearer</td><td>Store profile, compute macro targets</td></tr>
    <tr><td><code>GET /api/v1/exercises</code></td><td>-</td><td>List exercises (skip/limit)</td></tr>
    <tr><td><code>GET /api/v1/exercises/search</code></td><td>-</td><td>Search by name, muscle or equipment (q)</td></tr>
  </table>
</body>
</html>
"#;

/// API 文档页
pub async fn docs_page() -> Html<&'static str> {
    Html(DOCS_PAGE)
}
