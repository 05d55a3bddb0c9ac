// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        auth::{AccessPolicy, AuthGate, MasterKey},
        commands::articles::ArticleCommandService,
        dto::Identity,
        ports::{security::TokenManager, time::Clock},
        queries::articles::ArticleQueryService,
        ApplicationResult,
    },
    domain::article::{ArticleReadRepository, ArticleWriteRepository},
};

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    auth_gate: Arc<AuthGate>,
}

impl ApplicationServices {
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        token_manager: Arc<dyn TokenManager>,
        master_key: MasterKey,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));
        let auth_gate = Arc::new(AuthGate::new(master_key, token_manager));

        Self {
            article_commands,
            article_queries,
            auth_gate,
        }
    }

    /// Runs the access gate for a route policy against the presented credential.
    pub async fn authorize(
        &self,
        policy: AccessPolicy,
        credential: Option<&str>,
    ) -> ApplicationResult<Identity> {
        self.auth_gate.authorize(policy, credential).await
    }
}
