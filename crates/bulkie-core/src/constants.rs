//! Constantes del núcleo.

/// Versión lógica del core; aparece en trazas de depuración.
pub const CORE_VERSION: &str = "0.1";

/// Vigencia por defecto de un access token si el caller no indica expiración
/// explícita (medida desde el momento del minteo).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Monto por defecto (en la unidad mínima nativa) al auto-fondear una
/// identidad recién minteada. Equivale a 0.001 unidades.
pub const DEFAULT_FUNDING_AMOUNT: u128 = 1_000_000_000_000_000;
