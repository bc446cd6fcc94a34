//! Runner de pasos: el único camino de ejecución de operaciones.
//!
//! Cada operación pública de la fachada delega aquí. El runner comprueba
//! precondiciones de forma síncrona, mide la duración, registra el output
//! en éxito y envuelve el fallo etiquetándolo con la operación. El
//! `OutputStore` no se toca en ningún camino de error.

use std::future::Future;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::deps::NextStep;
use crate::errors::CoreError;
use crate::model::Op;
use crate::preconditions;

use super::Bulkie;

impl Bulkie {
    /// Ejecuta un paso cuyo resultado completo es serializable.
    pub(crate) async fn run_step<Out, Fut>(&mut self,
                                           op: Op,
                                           instance: Option<&str>,
                                           next_steps: &'static [NextStep],
                                           action: Fut)
                                           -> Result<Out, CoreError>
        where Out: Serialize,
              Fut: Future<Output = Result<Out, CoreError>>
    {
        self.run_step_with(op, instance, next_steps, async move {
                let out = action.await?;
                Ok((out, ()))
            })
            .await
            .map(|(out, ())| out)
    }

    /// Variante que separa el resultado registrable (`Out`, serializable) de
    /// un extra efímero (`Extra`, p.ej. un handle de conexión) que viaja al
    /// llamador pero no al registro.
    pub(crate) async fn run_step_with<Out, Extra, Fut>(&mut self,
                                                       op: Op,
                                                       instance: Option<&str>,
                                                       next_steps: &'static [NextStep],
                                                       action: Fut)
                                                       -> Result<(Out, Extra), CoreError>
        where Out: Serialize,
              Fut: Future<Output = Result<(Out, Extra), CoreError>>
    {
        // Barrera dura, antes de cualquier trabajo asíncrono.
        preconditions::check(op, &self.ctx)?;

        debug!(op = %op, "step started");
        self.guide.step_started(op, op.label());

        let started = Instant::now();
        match action.await {
            Ok((out, extra)) => {
                let elapsed = started.elapsed();
                self.total_execution += elapsed;

                let payload = serde_json::to_value(&out)
                    .map_err(|e| CoreError::Internal(format!("output encode for `{op}`: {e}")))?;
                self.ctx.outputs.set(op.key(), payload, instance);

                debug!(op = %op, elapsed_ms = elapsed.as_millis() as u64, "step completed");
                self.guide.step_completed(op, op.label(), elapsed, next_steps);
                Ok((out, extra))
            }
            Err(source) => {
                warn!(op = %op, error = %source, "step failed");
                Err(CoreError::in_step(op.label(), source))
            }
        }
    }
}
