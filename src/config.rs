// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub whatsapp: WhatsAppConfig,
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub access_token: String,
    pub phone_number_id: String,
    pub api_base_url: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let access_token =
            std::env::var("WHATSAPP_ACCESS_TOKEN").expect("WHATSAPP_ACCESS_TOKEN must be set");
        let phone_number_id =
            std::env::var("WHATSAPP_PHONE_NUMBER_ID").expect("WHATSAPP_PHONE_NUMBER_ID must be set");

        let api_base_url = std::env::var("WHATSAPP_API_BASE_URL")
            .unwrap_or_else(|_| "https://graph.facebook.com/v18.0".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);

        Config {
            database_url,
            port,
            whatsapp: WhatsAppConfig {
                access_token,
                phone_number_id,
                api_base_url,
            },
        }
    }
}
