//! Human-readable names for external auth providers

/// Label shown next to a member synced from the given auth module
pub fn auth_provider_label(auth_module: &str) -> &'static str {
    match auth_module {
        "oauth_github" => "GitHub",
        "oauth_google" => "Google",
        "oauth_azuread" => "AzureAD",
        "oauth_gitlab" => "GitLab",
        "oauth_grafana_com" | "oauth_grafananet" => "grafana.com",
        "oauth_okta" => "Okta",
        "auth.saml" => "SAML",
        "auth.jwt" => "JWT",
        "authproxy" => "Auth Proxy",
        "ldap" | "" => "LDAP",
        _ => "OAuth",
    }
}
