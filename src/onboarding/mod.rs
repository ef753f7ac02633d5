pub mod estimates;
pub mod wizard;

pub use estimates::{initial_estimates, InitialEstimates};
pub use wizard::{expectations, OnboardingDraft, OnboardingStep, OnboardingWizard};
