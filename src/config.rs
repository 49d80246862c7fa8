use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub mode: RuntimeMode,
    pub log_level: String,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub mail: MailConfig,
    pub provider: ProviderConfig,
    pub audit_sink: AuditSinkMode,
}

/// Fixed addressing for every forwarded question.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from: String,
    pub to: String,
    pub site_name: String,
}

#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Resend { api_key: String, api_url: String },
    Smtp(SmtpConfig),
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub tls_mode: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    pub fn max_db_connections(self) -> u32 {
        match self {
            RuntimeMode::Development => 2,
            RuntimeMode::Production => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuditSinkMode {
    /// Write audit records straight to the store.
    Store,
    /// Post audit records to `{base_url}/audit-log`.
    Http,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("INQUIRY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INQUIRY_HOST: {e}"))?;

        let port: u16 = env_or("INQUIRY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid INQUIRY_PORT: {e}"))?;

        let base_url = env_or("INQUIRY_BASE_URL", &format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let mode = match env_or("INQUIRY_MODE", "production").as_str() {
            "development" => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        };

        let default_level = match mode {
            RuntimeMode::Development => "debug",
            RuntimeMode::Production => "info",
        };
        let log_level = env_or("INQUIRY_LOG_LEVEL", default_level);

        let max_body_size: usize = env_or("INQUIRY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid INQUIRY_MAX_BODY_SIZE: {e}"))?;

        let cors_origins: Vec<String> = env_or("INQUIRY_CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let mail = MailConfig {
            from: env_required("INQUIRY_MAIL_FROM")?,
            to: env_required("INQUIRY_MAIL_TO")?,
            site_name: env_or("INQUIRY_SITE_NAME", "Inquiry"),
        };

        let provider = match env_or("INQUIRY_EMAIL_PROVIDER", "resend").as_str() {
            "resend" => ProviderConfig::Resend {
                api_key: env_required("RESEND_API_KEY")?,
                api_url: env_or("RESEND_API_URL", "https://api.resend.com")
                    .trim_end_matches('/')
                    .to_string(),
            },
            "smtp" => ProviderConfig::Smtp(SmtpConfig {
                host: env_required("INQUIRY_SMTP_HOST")?,
                port: env_or("INQUIRY_SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid INQUIRY_SMTP_PORT: {e}"))?,
                user: env_required("INQUIRY_SMTP_USER")?,
                pass: env_required("INQUIRY_SMTP_PASS")?,
                tls_mode: env_or("INQUIRY_SMTP_TLS", "starttls"),
            }),
            other => return Err(format!("Invalid INQUIRY_EMAIL_PROVIDER: {other}")),
        };

        let audit_sink = match env_or("INQUIRY_AUDIT_SINK", "store").as_str() {
            "store" => AuditSinkMode::Store,
            "http" => AuditSinkMode::Http,
            other => return Err(format!("Invalid INQUIRY_AUDIT_SINK: {other}")),
        };

        Ok(Config {
            database_url,
            host,
            port,
            base_url,
            mode,
            log_level,
            max_body_size,
            cors_origins,
            mail,
            provider,
            audit_sink,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
