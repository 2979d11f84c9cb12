//! Application wiring: storage selection, collaborators and the router.
//!
//! `main` builds real adapters from configuration; tests build the same
//! router over the in-memory store and scripted collaborators.

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;

use crate::adapters::ai::{GeminiConfig, GeminiProvider, GeminiTranscriber};
use crate::adapters::http::{
    app_router, CallAdminHandlers, ChatHandlers, HttpSettings, MarkupSettings, VoiceHandlers,
};
use crate::adapters::memory::InMemoryCallStore;
use crate::adapters::postgres::{
    run_migrations, PostgresCallSessionReader, PostgresCallSessionRepository,
    PostgresTurnRepository,
};
use crate::adapters::telephony::{AfricasTalkingConfig, AfricasTalkingGateway};
use crate::application::handlers::call::{
    CreateSessionHandler, GetAnalyticsHandler, GetSessionHandler, InitiateCallHandler,
    ListSessionsHandler, ListTurnsHandler,
};
use crate::application::handlers::chat::ChatService;
use crate::application::handlers::therapy::{ReplyGeneratorConfig, TherapyReplyGenerator};
use crate::application::handlers::voice::{ProcessRecordingHandler, StartCallHandler};
use crate::config::{AppConfig, DatabaseConfig};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AIError, AIProvider, CallSessionReader, CallSessionRepository, TelephonyError, Transcriber,
    TurnRepository, VoiceGateway,
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations failed: {0}")]
    Migrations(DomainError),

    #[error("model client: {0}")]
    Model(#[from] AIError),

    #[error("telephony client: {0}")]
    Telephony(#[from] TelephonyError),
}

/// The three storage ports, backed by one store.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn CallSessionRepository>,
    pub turns: Arc<dyn TurnRepository>,
    pub reader: Arc<dyn CallSessionReader>,
}

impl Storage {
    pub fn in_memory(store: InMemoryCallStore) -> Self {
        let store = Arc::new(store);
        Self {
            sessions: store.clone(),
            turns: store.clone(),
            reader: store,
        }
    }

    /// PostgreSQL when a URL is configured, otherwise process memory.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StartupError> {
        let Some(url) = config.url() else {
            tracing::warn!("No database URL configured; sessions are kept in memory only");
            return Ok(Self::in_memory(InMemoryCallStore::new()));
        };

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect(url)
            .await?;

        if config.run_migrations {
            run_migrations(&pool)
                .await
                .map_err(StartupError::Migrations)?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self {
            sessions: Arc::new(PostgresCallSessionRepository::new(pool.clone())),
            turns: Arc::new(PostgresTurnRepository::new(pool.clone())),
            reader: Arc::new(PostgresCallSessionReader::new(pool)),
        })
    }
}

/// External services the handlers talk to.
#[derive(Clone)]
pub struct Collaborators {
    pub ai: Arc<dyn AIProvider>,
    pub transcriber: Arc<dyn Transcriber>,
    pub gateway: Arc<dyn VoiceGateway>,
}

impl Collaborators {
    /// Gemini for replies and transcription, Africa's Talking for calls.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let gemini = GeminiProvider::new(
            GeminiConfig::new(config.ai.gemini_api_key.clone().unwrap_or_default())
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries),
        )?;
        let transcriber =
            GeminiTranscriber::new(gemini.clone(), config.telephony.transcription_timeout())
                .with_max_recording_secs(config.telephony.record_max_length_secs);

        let mut telephony = AfricasTalkingConfig::new(config.telephony.username.clone())
            .with_base_url(config.telephony.base_url.clone());
        if let Some(key) = config.telephony.api_key.as_ref().filter(|k| !k.is_empty()) {
            telephony = telephony.with_api_key(key.clone());
        }
        if let Some(number) = &config.telephony.voice_number {
            telephony = telephony.with_voice_number(number.clone());
        }

        Ok(Self {
            ai: Arc::new(gemini),
            transcriber: Arc::new(transcriber),
            gateway: Arc::new(AfricasTalkingGateway::new(telephony)?),
        })
    }
}

/// Builds every handler and the full router.
pub fn build_router(config: &AppConfig, storage: Storage, collaborators: Collaborators) -> Router {
    let request_timeout = std::time::Duration::from_secs(config.server.request_timeout_secs);
    let generator = Arc::new(TherapyReplyGenerator::new(
        collaborators.ai.clone(),
        ReplyGeneratorConfig {
            history_window: config.therapy.history_window,
            timeout: config.ai.timeout(),
            temperature: config.ai.temperature,
            max_output_tokens: config.ai.max_output_tokens,
        },
    ));

    let voice = VoiceHandlers::new(
        Arc::new(StartCallHandler::new(storage.sessions.clone())),
        Arc::new(
            ProcessRecordingHandler::new(
                storage.sessions.clone(),
                storage.turns.clone(),
                collaborators.transcriber.clone(),
                generator,
            )
            .with_caller_scan(config.therapy.scan_caller_utterance),
        ),
        MarkupSettings::new(config.server.recording_callback_url())
            .with_voice(config.telephony.voice.clone())
            .with_record_max_length(config.telephony.record_max_length_secs),
    )
    .with_deadline(request_timeout);

    let admin = CallAdminHandlers::new(
        Arc::new(ListSessionsHandler::new(storage.sessions.clone())),
        Arc::new(CreateSessionHandler::new(storage.sessions.clone())),
        Arc::new(GetSessionHandler::new(
            storage.sessions.clone(),
            storage.turns.clone(),
        )),
        Arc::new(ListTurnsHandler::new(
            storage.sessions.clone(),
            storage.turns.clone(),
        )),
        Arc::new(GetAnalyticsHandler::new(storage.reader.clone())),
        Arc::new(InitiateCallHandler::new(collaborators.gateway.clone())),
    );

    let chat = ChatHandlers::new(Arc::new(ChatService::new(
        collaborators.ai,
        config.ai.timeout(),
    )));

    let settings = HttpSettings {
        request_timeout,
        cors_origins: config.server.cors_origins_list(),
    };

    app_router(voice, admin, chat, &settings)
}
