use sea_orm::{Database, DatabaseConnection, DbErr};
use tokio::net::lookup_host;

fn redact_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let Some((userinfo, hostport)) = authority.rsplit_once('@') else {
        return url.to_string();
    };

    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{hostport}{path}"),
        None => url.to_string(),
    }
}

fn extract_host_port(url: &str) -> Option<(String, u16)> {
    let after_scheme = url.split("://").nth(1)?;
    let authority = after_scheme.split('/').next().unwrap_or(after_scheme);
    let hostport = authority.split('@').last().unwrap_or(authority);
    let mut parts = hostport.split(':');
    let host = parts.next()?.to_string();
    let port = parts
        .next()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5432);
    Some((host, port))
}

pub async fn connect(url: Option<&str>) -> Result<DatabaseConnection, DbErr> {
    let url = url.ok_or_else(|| DbErr::Custom("DATABASE_URL is not set".to_string()))?;
    tracing::info!(database_url = %redact_db_url(url), "db: connecting");

    if let Some((host, port)) = extract_host_port(url) {
        match lookup_host((host.as_str(), port)).await {
            Ok(addrs) => {
                let list: Vec<String> = addrs.map(|addr| addr.to_string()).collect();
                tracing::debug!("db: lookup_host {}:{} => {:?}", host, port, list);
            }
            Err(err) => {
                tracing::warn!("db: lookup_host {}:{} failed: {}", host, port, err);
            }
        }
    }
    Database::connect(url).await
}
