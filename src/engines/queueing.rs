//! Engine A: combined M/M/c queue (Erlang-C approximation).
//!
//! # Algorithm
//!
//! 1. Merge emergency and clinic arrivals into one rate λ (per minute).
//! 2. μ = 1 / avgServiceMinutes, c = min(doctors, beds).
//! 3. Erlang-C delay probability Pc.
//! 4. Classify ρ = λ/(cμ) into a [`WaitRegime`] and cap the Erlang-C wait
//!    `Wq = Pc / (cμ(1 − ρ))` with that regime's ceiling.
//! 5. Throughput is the lesser of arrivals and server capacity.
//!
//! # Reference
//! Gross et al. (2008), "Fundamentals of Queueing Theory", Ch. 2.3 (M/M/c)

use tracing::debug;

use super::kpi::{
    finite_non_negative, round_tenths, saturate, to_count, to_units, utilization_pct,
};
use super::{AnalyticalEngine, Estimate};
use crate::models::{
    Diagnostics, EngineKey, EngineSummary, QueueingDiagnostics, ResourceEcho,
    SimulationParameters, WaitRegime,
};
use crate::normalize::QueueingParams;

/// ρ at which the queue counts as near saturation.
pub const NEAR_SATURATION_RHO: f64 = 0.95;

/// ρ at which the queue counts as overloaded.
pub const OVERLOAD_RHO: f64 = 1.0;

/// Upper bound on ρ inside the Wq formula.
const MAX_FORMULA_RHO: f64 = 0.999;

impl WaitRegime {
    /// Classifies an uncapped traffic intensity.
    pub fn classify(load_factor: f64) -> Self {
        if load_factor >= OVERLOAD_RHO {
            WaitRegime::Overloaded
        } else if load_factor >= NEAR_SATURATION_RHO {
            WaitRegime::NearSaturation
        } else {
            WaitRegime::Stable
        }
    }

    /// Wait ceiling for this regime, in minutes.
    pub fn cap_minutes(&self, avg_service_minutes: f64) -> f64 {
        match self {
            WaitRegime::Stable => avg_service_minutes.min(30.0),
            WaitRegime::NearSaturation => (2.0 * avg_service_minutes).min(60.0),
            WaitRegime::Overloaded => (3.0 * avg_service_minutes).min(120.0),
        }
    }

    /// Applies the regime policy to a raw Erlang-C wait.
    ///
    /// Overloaded queues ignore `raw` and return the ceiling.
    pub fn wait_minutes(&self, raw: f64, avg_service_minutes: f64) -> f64 {
        let cap = self.cap_minutes(avg_service_minutes);
        match self {
            WaitRegime::Overloaded => cap,
            WaitRegime::Stable | WaitRegime::NearSaturation => raw.min(cap),
        }
    }
}

/// Erlang-C probability that an arrival waits.
///
/// `lambda` and `mu` are per-minute rates, `servers` the number of
/// parallel servers. Returns 0 for an idle or degenerate system and 1 when
/// ρ ≥ 1.
///
/// The finite sum is evaluated as ratios to the `a^c/c!` term, so large
/// server counts never overflow a factorial. The sum stops once the
/// remaining tail is below one ulp or the sum overflows, which bounds the
/// work for any `servers`.
///
/// ```
/// use u_hospital::engines::erlang_c;
/// let pc = erlang_c(0.1, 1.0 / 15.0, 3);
/// assert!((pc - 0.236842).abs() < 1e-6);
/// ```
pub fn erlang_c(lambda: f64, mu: f64, servers: u32) -> f64 {
    if lambda <= 0.0 || mu <= 0.0 || servers == 0 {
        return 0.0;
    }
    let offered = lambda / mu;
    let rho = offered / servers as f64;
    if rho >= OVERLOAD_RHO {
        return 1.0;
    }

    // Σ_{n<c} (a^n/n!) / (a^c/c!)
    let mut ratio = 1.0;
    let mut sum = 0.0;
    for k in (1..=servers).rev() {
        ratio *= k as f64 / offered;
        sum += ratio;
        if !sum.is_finite() {
            // Pc underflows to 0
            return 0.0;
        }
        // Below k < a the remaining terms shrink by at least q per step.
        let q = (k - 1) as f64 / offered;
        if q < 1.0 && ratio * q / (1.0 - q) <= sum * f64::EPSILON {
            break;
        }
    }

    1.0 / (1.0 + (1.0 - rho) * sum)
}

/// Engine A: combined queue served by `min(doctors, beds)` servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueingEngine;

impl AnalyticalEngine for QueueingEngine {
    fn key(&self) -> EngineKey {
        EngineKey::Queueing
    }

    fn description(&self) -> &'static str {
        "Erlang-C wait estimate for a single merged clinic queue"
    }

    fn estimate(&self, params: &SimulationParameters) -> Estimate {
        let p = QueueingParams::from_parameters(params);
        let svc = p.avg_service_minutes;
        let servers = p.servers();
        let server_count = to_units(servers);

        let lambda = p.arrivals_per_hour() / 60.0;
        let mu = 1.0 / svc;
        let load_factor = lambda / (servers * mu);
        let rho = load_factor.min(MAX_FORMULA_RHO);
        let pc = erlang_c(lambda, mu, server_count);

        let regime = WaitRegime::classify(load_factor);
        let raw_wait = match regime {
            WaitRegime::Overloaded => None,
            WaitRegime::Stable | WaitRegime::NearSaturation => {
                Some(pc * (1.0 / mu) / (servers * (1.0 - rho)))
            }
        };
        let wait = finite_non_negative(regime.wait_minutes(raw_wait.unwrap_or(0.0), svc));

        debug!(
            engine = %EngineKey::Queueing,
            lambda,
            mu,
            servers,
            load_factor,
            erlang_c = pc,
            ?regime,
            wait,
            "queueing wait computed"
        );

        let expected_arrivals = saturate(lambda * 60.0 * p.duration_hours);
        let max_throughput = saturate(servers * (60.0 / svc) * p.duration_hours);
        // Overloaded queues serve at capacity, which is then below arrivals.
        let served = to_count(expected_arrivals.min(max_throughput).floor());

        let summary = EngineSummary {
            engine: EngineKey::Queueing,
            avg_wait_minutes: round_tenths(wait),
            patients_served: served,
            overall_utilization_pct: utilization_pct(load_factor),
            resources: ResourceEcho::Queueing {
                servers: server_count,
                doctors: to_units(p.doctors),
                beds: to_units(p.beds),
            },
        };

        let diagnostics = Diagnostics::Queueing(QueueingDiagnostics {
            lambda,
            mu,
            servers: server_count,
            duration_hours: p.duration_hours,
            load_factor,
            rho,
            erlang_c: pc,
            raw_wait_minutes: raw_wait,
            wait_minutes: wait,
            time_in_system_minutes: wait + 1.0 / mu,
            expected_arrivals,
            max_throughput,
            regime,
        });

        Estimate {
            summary,
            diagnostics,
        }
    }
}
