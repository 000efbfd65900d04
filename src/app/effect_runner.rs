//! Executes side effects returned by the reducer.
//!
//! Database effects run on spawned tasks and report back with exactly one
//! completion action. Registry and config effects run inline so that a
//! `Sequence` keeps its order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::app::action::{Action, PendingMutation};
use crate::app::effect::Effect;
use crate::app::ports::{ConfigStore, ConnectionManager, DbError, MetadataProvider, QueryExecutor, Renderer};
use crate::app::state::AppState;
use crate::app::table_view::PageRequest;
use crate::domain::{ConfigFile, ResultSource};

/// Abandons `fut` once `duration` has passed. The underlying call is not
/// interrupted server-side.
async fn with_timeout<T>(
    duration: Duration,
    fut: impl Future<Output = Result<T, DbError>>,
) -> Result<T, DbError> {
    tokio::time::timeout(duration, fut)
        .await
        .unwrap_or(Err(DbError::Timeout(duration)))
}

pub struct EffectRunner {
    connections: Arc<dyn ConnectionManager>,
    metadata_provider: Arc<dyn MetadataProvider>,
    query_executor: Arc<dyn QueryExecutor>,
    config_store: Arc<dyn ConfigStore>,
    action_tx: mpsc::Sender<Action>,
}

impl EffectRunner {
    pub fn new(
        connections: Arc<dyn ConnectionManager>,
        metadata_provider: Arc<dyn MetadataProvider>,
        query_executor: Arc<dyn QueryExecutor>,
        config_store: Arc<dyn ConfigStore>,
        action_tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            connections,
            metadata_provider,
            query_executor,
            config_store,
            action_tx,
        }
    }

    pub async fn run<R: Renderer>(
        &self,
        effects: Vec<Effect>,
        renderer: &mut R,
        state: &mut AppState,
    ) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Sequence(seq_effects) => {
                    for seq_effect in seq_effects {
                        self.run_single(seq_effect, renderer, state).await?;
                    }
                }
                single_effect => self.run_single(single_effect, renderer, state).await?,
            }
        }
        Ok(())
    }

    async fn run_single<R: Renderer>(
        &self,
        effect: Effect,
        renderer: &mut R,
        state: &mut AppState,
    ) -> Result<()> {
        let timeout = effect.timeout().unwrap_or(Duration::MAX);
        match effect {
            Effect::Render => {
                renderer.draw(state)?;
            }

            Effect::Connect { name } => {
                let connections = Arc::clone(&self.connections);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action = match with_timeout(timeout, connections.connect(&name)).await {
                        Ok(()) => Action::Connected { name },
                        Err(e) => {
                            log::warn!("connect {} failed: {}", name, e);
                            Action::ConnectFailed {
                                name,
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = tx.send(action).await;
                });
            }
            Effect::Disconnect { name } => {
                let connections = Arc::clone(&self.connections);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = connections.disconnect(&name).await {
                        log::warn!("disconnect {} failed: {}", name, e);
                    }
                    let _ = tx.send(Action::Disconnected { name }).await;
                });
            }
            Effect::LoadTables { name } => {
                let metadata = Arc::clone(&self.metadata_provider);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action = match with_timeout(timeout, metadata.list_tables(&name)).await {
                        Ok(tables) => Action::TablesLoaded { name, tables },
                        Err(e) => {
                            log::warn!("list tables on {} failed: {}", name, e);
                            Action::TablesFailed {
                                name,
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = tx.send(action).await;
                });
            }
            Effect::LoadColumns {
                connection,
                schema,
                table,
            } => {
                let metadata = Arc::clone(&self.metadata_provider);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let fut = metadata.list_columns(&connection, &schema, &table);
                    let action = match with_timeout(timeout, fut).await {
                        Ok(columns) => Action::ColumnsLoaded {
                            connection,
                            schema,
                            table,
                            columns,
                        },
                        Err(e) => {
                            log::warn!("list columns of {}.{} failed: {}", schema, table, e);
                            Action::ColumnsFailed {
                                connection,
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = tx.send(action).await;
                });
            }
            Effect::LoadTableData {
                connection,
                schema,
                table,
                limit,
                offset,
            } => {
                let executor = Arc::clone(&self.query_executor);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let request = PageRequest {
                        connection,
                        schema,
                        table,
                        offset,
                    };
                    let fut = executor.execute_preview(
                        &request.connection,
                        &request.schema,
                        &request.table,
                        limit,
                        offset,
                    );
                    let outcome = with_timeout(timeout, fut).await;
                    let action = match outcome {
                        Ok(mut result) => {
                            result.source = request.source();
                            Action::TableDataLoaded {
                                request,
                                result: Box::new(result),
                            }
                        }
                        Err(e) => {
                            log::warn!("load {}.{} failed: {}", request.schema, request.table, e);
                            Action::TableDataFailed {
                                request,
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = tx.send(action).await;
                });
            }
            Effect::ExecuteQuery { connection, sql } => {
                let executor = Arc::clone(&self.query_executor);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action =
                        match with_timeout(timeout, executor.execute_adhoc(&connection, &sql)).await {
                            Ok(mut result) => {
                                result.source = ResultSource::Query { connection };
                                Action::QueryCompleted(Box::new(result))
                            }
                            Err(e) => Action::QueryFailed {
                                error: e.to_string(),
                            },
                        };
                    let _ = tx.send(action).await;
                });
            }
            Effect::Mutate(mutation) => self.spawn_mutation(mutation, timeout),

            Effect::RegisterConnection(profile) => {
                log::info!("register connection {}", profile.name);
                self.connections.register(profile).await;
            }
            Effect::UpdateConnection { old_name, profile } => {
                log::info!("update connection {} -> {}", old_name, profile.name);
                self.connections.update(&old_name, profile).await;
            }
            Effect::RemoveConnection { name } => {
                log::info!("remove connection {}", name);
                self.connections.remove(&name).await;
            }
            Effect::SaveConfig { config, notice } => {
                let action = self.save_config(&config, notice);
                let _ = self.action_tx.send(action).await;
            }
            Effect::CloseAll => {
                self.connections.close_all().await;
            }

            Effect::Sequence(effects) => {
                for effect in effects {
                    Box::pin(self.run_single(effect, renderer, state)).await?;
                }
            }
            Effect::DispatchActions(actions) => {
                for action in actions {
                    let _ = self.action_tx.send(action).await;
                }
            }
        }
        Ok(())
    }

    fn spawn_mutation(&self, mutation: PendingMutation, timeout: Duration) {
        let executor = Arc::clone(&self.query_executor);
        let tx = self.action_tx.clone();
        log::debug!(
            "{:?} on {}: {}",
            mutation.kind,
            mutation.connection,
            mutation.query.sql
        );
        tokio::spawn(async move {
            let PendingMutation {
                connection,
                kind,
                query,
            } = mutation;
            let action =
                match with_timeout(timeout, executor.execute_write(&connection, &query)).await {
                    Ok(rows_affected) => Action::MutationApplied {
                        kind,
                        rows_affected,
                    },
                    Err(e) => {
                        log::warn!("{:?} on {} failed: {}", kind, connection, e);
                        Action::MutationFailed {
                            kind,
                            error: e.to_string(),
                        }
                    }
                };
            let _ = tx.send(action).await;
        });
    }

    fn save_config(&self, config: &ConfigFile, notice: String) -> Action {
        match self.config_store.save(config) {
            Ok(()) => Action::ConfigSaved { notice },
            Err(e) => {
                log::warn!("saving config failed: {}", e);
                Action::ConfigSaveFailed {
                    error: e.to_string(),
                }
            }
        }
    }
}
