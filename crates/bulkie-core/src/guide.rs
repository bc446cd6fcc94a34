//! Observador de guía inyectable.
//!
//! El core no escribe a ninguna salida global: la guía "what can I do next"
//! pasa por este trait, con default no-op. La implementación de consola
//! reproduce la salida interactiva clásica; el diagnóstico fino va por
//! `tracing` y es asunto del binario configurar un subscriber.

use std::time::Duration;

use crate::deps::NextStep;
use crate::model::Op;

/// Observador de pasos. Todos los métodos son opcionales y sin efecto
/// funcional: pura asistencia al humano.
pub trait Guide: Send + Sync {
    fn step_started(&self, _op: Op, _label: &str) {}

    fn step_completed(&self, _op: Op, _label: &str, _elapsed: Duration, _next_steps: &[NextStep]) {}
}

/// Default: no emite nada.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGuide;

impl Guide for NoopGuide {}

/// Guía por consola al estilo clásico.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleGuide;

impl Guide for ConsoleGuide {
    fn step_completed(&self, _op: Op, label: &str, elapsed: Duration, next_steps: &[NextStep]) {
        println!("\n  ✅ {label} completed successfully in {}ms", elapsed.as_millis());
        if !next_steps.is_empty() {
            println!("  ❓ What can I do next?");
            for step in next_steps {
                println!("    - {}", step.render());
            }
        }
        println!("\n------------------------------------------------------------------------\n");
    }
}
