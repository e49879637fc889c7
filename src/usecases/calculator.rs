//! Calculator use case. Model-view-update core plus the service that runs its commands.
//!
//! `update` is pure: it mutates the owned `AppState` and returns at most one `Command`.
//! `CalculatorService` executes commands by spawning advice requests whose completions
//! come back as `Msg`s over an mpsc channel, so state is only ever touched by `update`.

use crate::domain::{
    BmiCategory, BmiResult, FormInput, Gender, HealthAdvice, classify_measurement,
    parse_measurement,
};
use crate::ports::AdviceProvider;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything the view renders.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppState {
    pub result: Option<BmiResult>,
    pub advice: Option<HealthAdvice>,
    /// Advice requests issued but not yet resolved.
    pub pending: usize,
    next_request_id: u64,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

/// Events fed into `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User pressed "calculate".
    Calculate(FormInput),
    AdviceLoaded { request_id: u64, advice: HealthAdvice },
    AdviceFailed { request_id: u64, reason: String },
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RequestAdvice(AdviceRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    pub request_id: u64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub age: u32,
    pub gender: Gender,
}

/// Apply one message to the state.
///
/// Invalid input leaves the state untouched. Advice completions always apply, so the
/// last one delivered wins.
pub fn update(state: &mut AppState, msg: Msg) -> Option<Command> {
    match msg {
        Msg::Calculate(input) => {
            let measurement = parse_measurement(&input)?;
            let result = classify_measurement(&measurement)?;
            state.next_request_id += 1;
            let request = AdviceRequest {
                request_id: state.next_request_id,
                bmi: result.bmi,
                category: result.category,
                age: measurement.age,
                gender: measurement.gender,
            };
            state.result = Some(result);
            state.advice = None;
            state.pending += 1;
            Some(Command::RequestAdvice(request))
        }
        Msg::AdviceLoaded { advice, .. } => {
            state.pending = state.pending.saturating_sub(1);
            state.advice = Some(advice);
            None
        }
        Msg::AdviceFailed { .. } => {
            state.pending = state.pending.saturating_sub(1);
            None
        }
    }
}

/// Owns the state and the advice provider; runs commands asynchronously.
pub struct CalculatorService {
    advice: Arc<dyn AdviceProvider>,
    state: AppState,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
}

impl CalculatorService {
    pub fn new(advice: Arc<dyn AdviceProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            advice,
            state: AppState::default(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run `update` and execute whatever command it returns.
    pub fn dispatch(&mut self, msg: Msg) {
        if let Msg::AdviceFailed { request_id, reason } = &msg {
            warn!(request_id, error = %reason, "advice request failed; showing result only");
        }
        if let Some(cmd) = update(&mut self.state, msg) {
            self.execute(cmd);
        }
    }

    /// Submit the form. Returns false when the input was not a valid measurement (no-op).
    pub fn calculate(&mut self, input: FormInput) -> bool {
        let before = self.state.pending;
        self.dispatch(Msg::Calculate(input));
        let issued = self.state.pending > before;
        if !issued {
            info!("weight/height missing or not positive; nothing calculated");
        }
        issued
    }

    /// Wait for the next advice completion and apply it.
    /// Returns immediately with false when nothing is outstanding.
    pub async fn next_event(&mut self) -> bool {
        if !self.state.is_loading() {
            return false;
        }
        match self.rx.recv().await {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Apply completions until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.next_event().await {}
    }

    fn execute(&self, cmd: Command) {
        match cmd {
            Command::RequestAdvice(req) => {
                debug!(
                    request_id = req.request_id,
                    bmi = req.bmi,
                    category = %req.category,
                    age = req.age,
                    gender = %req.gender,
                    "requesting advice"
                );
                let provider = Arc::clone(&self.advice);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let request_id = req.request_id;
                    // Inner task so a panicking provider still produces a completion.
                    let call = tokio::spawn(async move {
                        provider
                            .request_advice(req.bmi, req.category, req.age, req.gender)
                            .await
                    });
                    let msg = match call.await {
                        Ok(Ok(advice)) => Msg::AdviceLoaded { request_id, advice },
                        Ok(Err(e)) => Msg::AdviceFailed {
                            request_id,
                            reason: e.to_string(),
                        },
                        Err(e) => Msg::AdviceFailed {
                            request_id,
                            reason: format!("advice task aborted: {}", e),
                        },
                    };
                    let _ = tx.send(msg);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    fn form(weight: &str, height: &str) -> FormInput {
        FormInput {
            weight: weight.into(),
            height: height.into(),
            age: 25,
            gender: Gender::Female,
        }
    }

    fn sample_advice(tag: &str) -> HealthAdvice {
        HealthAdvice {
            summary: format!("summary {}", tag),
            recommendations: vec![format!("rec {}", tag)],
            diet_tips: vec![format!("tip {}", tag)],
        }
    }

    /// Records every call and answers with fixed advice or a failure.
    struct RecordingProvider {
        calls: Mutex<Vec<(f64, BmiCategory, u32, Gender)>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl AdviceProvider for RecordingProvider {
        async fn request_advice(
            &self,
            bmi: f64,
            category: BmiCategory,
            age: u32,
            gender: Gender,
        ) -> Result<HealthAdvice, DomainError> {
            self.calls.lock().unwrap().push((bmi, category, age, gender));
            if self.fail {
                Err(DomainError::Advice("simulated outage".into()))
            } else {
                Ok(sample_advice("ok"))
            }
        }
    }

    /// Each call blocks until the test releases it through a oneshot.
    struct GatedProvider {
        gates: Mutex<Vec<oneshot::Receiver<HealthAdvice>>>,
    }

    #[async_trait::async_trait]
    impl AdviceProvider for GatedProvider {
        async fn request_advice(
            &self,
            _bmi: f64,
            _category: BmiCategory,
            _age: u32,
            _gender: Gender,
        ) -> Result<HealthAdvice, DomainError> {
            let gate = self.gates.lock().unwrap().remove(0);
            gate.await
                .map_err(|_| DomainError::Advice("gate dropped".into()))
        }
    }

    struct PanickingProvider;

    #[async_trait::async_trait]
    impl AdviceProvider for PanickingProvider {
        async fn request_advice(
            &self,
            _bmi: f64,
            _category: BmiCategory,
            _age: u32,
            _gender: Gender,
        ) -> Result<HealthAdvice, DomainError> {
            panic!("provider bug")
        }
    }

    #[test]
    fn test_update_calculate_issues_request() {
        let mut state = AppState::default();
        let cmd = update(&mut state, Msg::Calculate(form("55", "165")));
        let Some(Command::RequestAdvice(req)) = cmd else {
            panic!("expected advice request");
        };
        assert_eq!(req.request_id, 1);
        assert_eq!(req.category, BmiCategory::Normal);
        assert_eq!(req.age, 25);
        assert_eq!(req.gender, Gender::Female);
        assert!(state.is_loading());
        assert_eq!(state.result.as_ref().unwrap().category, BmiCategory::Normal);
    }

    #[test]
    fn test_update_invalid_input_is_noop() {
        let mut state = AppState::default();
        update(&mut state, Msg::Calculate(form("55", "165")));
        let before = state.clone();
        assert!(update(&mut state, Msg::Calculate(form("0", "165"))).is_none());
        assert!(update(&mut state, Msg::Calculate(form("55", ""))).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_new_calculation_clears_advice() {
        let mut state = AppState::default();
        update(&mut state, Msg::Calculate(form("55", "165")));
        update(
            &mut state,
            Msg::AdviceLoaded {
                request_id: 1,
                advice: sample_advice("a"),
            },
        );
        assert!(state.advice.is_some());
        update(&mut state, Msg::Calculate(form("90", "170")));
        assert!(state.advice.is_none());
        assert_eq!(state.result.as_ref().unwrap().category, BmiCategory::Obese);
    }

    #[test]
    fn test_update_failure_keeps_result() {
        let mut state = AppState::default();
        update(&mut state, Msg::Calculate(form("55", "165")));
        update(
            &mut state,
            Msg::AdviceFailed {
                request_id: 1,
                reason: "boom".into(),
            },
        );
        assert!(state.result.is_some());
        assert!(state.advice.is_none());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_scenario_success() {
        let provider = Arc::new(RecordingProvider::new(false));
        let mut service = CalculatorService::new(provider.clone());

        assert!(service.calculate(form("55", "165")));
        let result = service.state().result.clone().unwrap();
        assert_eq!(result.rounded(), 20.2);
        assert_eq!(result.category, BmiCategory::Normal);

        service.settle().await;

        let calls = provider.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        let (bmi, category, age, gender) = calls[0];
        assert!((bmi - 20.2).abs() < 0.01);
        assert_eq!(category, BmiCategory::Normal);
        assert_eq!(age, 25);
        assert_eq!(gender, Gender::Female);

        let advice = service.state().advice.clone().unwrap();
        assert!(!advice.summary.is_empty());
        assert!(!advice.recommendations.is_empty());
        assert!(!advice.diet_tips.is_empty());
        assert!(!service.state().is_loading());
    }

    #[tokio::test]
    async fn test_scenario_failure_is_swallowed() {
        let provider = Arc::new(RecordingProvider::new(true));
        let mut service = CalculatorService::new(provider);

        assert!(service.calculate(form("55", "165")));
        service.settle().await;

        assert!(service.state().advice.is_none());
        assert_eq!(
            service.state().result.as_ref().unwrap().category,
            BmiCategory::Normal
        );
        assert!(!service.state().is_loading());
    }

    #[tokio::test]
    async fn test_invalid_input_issues_no_request() {
        let provider = Arc::new(RecordingProvider::new(false));
        let mut service = CalculatorService::new(provider.clone());

        assert!(!service.calculate(form("0", "165")));
        assert!(!service.next_event().await);
        assert!(service.state().result.is_none());
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_provider_counts_as_failure() {
        let mut service = CalculatorService::new(Arc::new(PanickingProvider));
        assert!(service.calculate(form("55", "165")));
        service.settle().await;
        assert!(service.state().advice.is_none());
        assert!(!service.state().is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_requests_last_resolved_wins() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let provider = Arc::new(GatedProvider {
            gates: Mutex::new(vec![first_rx, second_rx]),
        });
        let mut service = CalculatorService::new(provider);

        assert!(service.calculate(form("55", "165")));
        // Let the first request take its gate before the second is issued.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(service.calculate(form("90", "170")));
        assert_eq!(service.state().pending, 2);

        second_tx.send(sample_advice("second")).unwrap();
        assert!(service.next_event().await);
        assert_eq!(service.state().advice.as_ref().unwrap().summary, "summary second");
        assert_eq!(service.state().pending, 1);

        first_tx.send(sample_advice("first")).unwrap();
        service.settle().await;
        assert_eq!(service.state().advice.as_ref().unwrap().summary, "summary first");
        assert_eq!(service.state().pending, 0);
        assert_eq!(
            service.state().result.as_ref().unwrap().category,
            BmiCategory::Obese
        );
    }
}
