//! Core data models for predictive-maintenance analysis
//!
//! Wire names are camelCase to match the request/response JSON of the
//! analysis endpoint.

use serde::{Deserialize, Serialize};

use crate::catalog::EquipmentType;

/// One physical unit under analysis, as identified upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    /// Free text that may embed a 4-digit manufacturing year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing: Option<String>,
}

impl EquipmentDescriptor {
    /// Descriptor with only the equipment type set
    pub fn of_type(equipment_type: impl Into<String>) -> Self {
        Self {
            equipment_type: Some(equipment_type.into()),
            ..Self::default()
        }
    }

    /// Resolve the closed equipment type used for every table lookup
    pub fn kind(&self) -> EquipmentType {
        self.equipment_type
            .as_deref()
            .map(EquipmentType::parse)
            .unwrap_or(EquipmentType::Unknown)
    }
}

/// Qualitative usage intensity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageIntensity {
    Heavy,
    #[default]
    Moderate,
    Light,
}

impl UsageIntensity {
    /// Multiplier applied to base failure probability
    pub fn failure_multiplier(&self) -> f64 {
        match self {
            UsageIntensity::Heavy => 1.3,
            UsageIntensity::Moderate => 1.0,
            UsageIntensity::Light => 0.7,
        }
    }
}

impl std::str::FromStr for UsageIntensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heavy" => Ok(UsageIntensity::Heavy),
            "moderate" | "normal" => Ok(UsageIntensity::Moderate),
            "light" => Ok(UsageIntensity::Light),
            other => Err(format!("unrecognized usage intensity '{}'", other)),
        }
    }
}

/// Usage pattern as accepted on the wire
///
/// Accepts either a token (`"heavy"`) or the flag object
/// (`{"heavy": true}`); heavy wins when both flags are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UsagePatternRepr", into = "String")]
pub struct UsagePattern {
    pub intensity: UsageIntensity,
}

impl UsagePattern {
    pub fn new(intensity: UsageIntensity) -> Self {
        Self { intensity }
    }

    pub fn is_heavy(&self) -> bool {
        self.intensity == UsageIntensity::Heavy
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UsagePatternRepr {
    Token(String),
    Flags {
        #[serde(default)]
        heavy: bool,
        #[serde(default)]
        light: bool,
    },
}

impl From<UsagePatternRepr> for UsagePattern {
    fn from(repr: UsagePatternRepr) -> Self {
        let intensity = match repr {
            UsagePatternRepr::Token(token) => token.parse().unwrap_or_default(),
            UsagePatternRepr::Flags { heavy: true, .. } => UsageIntensity::Heavy,
            UsagePatternRepr::Flags { light: true, .. } => UsageIntensity::Light,
            UsagePatternRepr::Flags { .. } => UsageIntensity::Moderate,
        };
        Self { intensity }
    }
}

impl From<UsagePattern> for String {
    fn from(pattern: UsagePattern) -> Self {
        match pattern.intensity {
            UsageIntensity::Heavy => "heavy",
            UsageIntensity::Moderate => "moderate",
            UsageIntensity::Light => "light",
        }
        .to_string()
    }
}

/// Site conditions affecting wear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentDescriptor {
    pub extreme_temperatures: bool,
    pub high_humidity: bool,
    pub salt_air: bool,
    pub dusty: bool,
}

/// Who the analysis is presented to
///
/// Unrecognized or null tokens fall back to technician.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum AnalysisMode {
    #[default]
    Technician,
    Homeowner,
}

impl From<Option<String>> for AnalysisMode {
    fn from(token: Option<String>) -> Self {
        match token.as_deref().map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("homeowner") => AnalysisMode::Homeowner,
            _ => AnalysisMode::Technician,
        }
    }
}

/// Where a manufacturing year was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeSource {
    ManufacturingField,
    SerialDecoder,
    SerialScan,
}

/// Result of age resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeEstimate {
    pub age: Option<u32>,
    pub manufacturing_year: Option<i32>,
    pub estimated: bool,
    /// 0-100
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<AgeSource>,
}

impl AgeEstimate {
    pub fn unknown() -> Self {
        Self {
            age: None,
            manufacturing_year: None,
            estimated: true,
            confidence: 0,
            source: None,
        }
    }
}

/// Qualitative confidence attached to a risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Numeric weight used by confidence aggregation
    pub fn weight(&self) -> f64 {
        match self {
            ConfidenceLevel::Low => 0.3,
            ConfidenceLevel::Medium => 0.6,
            ConfidenceLevel::High => 0.9,
        }
    }
}

/// One scored risk factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Always within [0, 1]
    pub score: f64,
    pub reason: String,
    pub confidence: ConfidenceLevel,
}

impl RiskFactor {
    pub fn new(score: f64, reason: impl Into<String>, confidence: ConfidenceLevel) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            reason: reason.into(),
            confidence,
        }
    }
}

/// Categorical risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Band a mean score at 0.4 / 0.7
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            RiskBand::High
        } else if score > 0.4 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub age_risk: RiskFactor,
    pub environmental_risk: RiskFactor,
    pub usage_risk: RiskFactor,
    pub maintenance_risk: RiskFactor,
    pub overall_risk: RiskBand,
}

impl RiskAssessment {
    pub fn factors(&self) -> [&RiskFactor; 4] {
        [
            &self.age_risk,
            &self.environmental_risk,
            &self.usage_risk,
            &self.maintenance_risk,
        ]
    }

    pub fn mean_score(&self) -> f64 {
        self.factors().iter().map(|f| f.score).sum::<f64>() / 4.0
    }
}

/// Expected time until failure, bucketed from probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureTimeframe {
    #[serde(rename = "Within 1 year")]
    WithinOneYear,
    #[serde(rename = "1-2 years")]
    OneToTwoYears,
    #[serde(rename = "2-3 years")]
    TwoToThreeYears,
    #[serde(rename = "3+ years")]
    ThreePlusYears,
    #[serde(rename = "unknown")]
    Unknown,
}

impl FailureTimeframe {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.8 {
            FailureTimeframe::WithinOneYear
        } else if probability > 0.6 {
            FailureTimeframe::OneToTwoYears
        } else if probability > 0.4 {
            FailureTimeframe::TwoToThreeYears
        } else {
            FailureTimeframe::ThreePlusYears
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FailureTimeframe::WithinOneYear => "Within 1 year",
            FailureTimeframe::OneToTwoYears => "1-2 years",
            FailureTimeframe::TwoToThreeYears => "2-3 years",
            FailureTimeframe::ThreePlusYears => "3+ years",
            FailureTimeframe::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePrediction {
    pub component: String,
    /// Failure mode text
    pub prediction: String,
    pub timeframe: FailureTimeframe,
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub confidence: f64,
}

/// Task lists keyed by service interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekly: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monthly: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quarterly: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub biannual: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annual: Vec<String>,
}

impl MaintenanceSchedule {
    pub fn task_count(&self) -> usize {
        self.weekly.len()
            + self.monthly.len()
            + self.quarterly.len()
            + self.biannual.len()
            + self.annual.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptimization {
    pub schedule: MaintenanceSchedule,
    pub reasoning: String,
    pub frequency_increased: bool,
    pub cost_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyBand {
    Overdue,
    Critical,
    High,
    Medium,
    Low,
}

impl UrgencyBand {
    pub fn from_life_ratio(ratio: f64) -> Self {
        if ratio > 1.1 {
            UrgencyBand::Overdue
        } else if ratio > 0.9 {
            UrgencyBand::Critical
        } else if ratio > 0.75 {
            UrgencyBand::High
        } else if ratio > 0.5 {
            UrgencyBand::Medium
        } else {
            UrgencyBand::Low
        }
    }

    pub fn urgency(&self) -> f64 {
        match self {
            UrgencyBand::Overdue => 0.95,
            UrgencyBand::Critical => 0.8,
            UrgencyBand::High => 0.6,
            UrgencyBand::Medium => 0.3,
            UrgencyBand::Low => 0.1,
        }
    }

    pub fn next_action(&self) -> &'static str {
        match self {
            UrgencyBand::Overdue => "Schedule immediate replacement",
            UrgencyBand::Critical => "Plan replacement within 6 months",
            UrgencyBand::High => "Monitor closely, plan for replacement",
            UrgencyBand::Medium | UrgencyBand::Low => "Continue normal maintenance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLifespanEntry {
    pub name: String,
    pub current_age: Option<u32>,
    pub expected_life: u32,
    /// Never negative
    pub remaining_life: u32,
    pub replacement_urgency: f64,
    pub urgency_band: UrgencyBand,
    pub estimated_cost: String,
    pub impact: String,
    pub next_action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostDecision {
    Maintain,
    Replace,
    Monitor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBenefitAnalysis {
    pub current_value: f64,
    pub replacement_cost: f64,
    pub maintenance_cost: f64,
    pub energy_savings: f64,
    pub breakdown_risk: f64,
    pub maintenance_roi: f64,
    pub replacement_roi: f64,
    pub recommendation: CostDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// critical=4, high=3, medium=2, low=1
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    AgeConcern,
    HighRisk,
    FailurePrediction,
    MaintenanceOptimization,
    ReplacementAdvisory,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub action: String,
    pub timeframe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
}

/// Full pipeline output for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAnalysis {
    pub equipment: EquipmentDescriptor,
    pub mode: AnalysisMode,
    pub current_age: AgeEstimate,
    pub risk_assessment: RiskAssessment,
    pub failure_predictions: Vec<FailurePrediction>,
    pub maintenance_schedule: ScheduleOptimization,
    pub component_lifespan: Vec<ComponentLifespanEntry>,
    pub cost_analysis: CostBenefitAnalysis,
    pub recommendations: Vec<Recommendation>,
    /// 0-100
    pub confidence: f64,
}

/// Request body of the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub equipment_data: EquipmentDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_patterns: Option<UsagePattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_data: Option<EnvironmentDescriptor>,
    #[serde(default)]
    pub mode: AnalysisMode,
}

impl AnalysisRequest {
    pub fn new(equipment_data: EquipmentDescriptor) -> Self {
        Self {
            equipment_data,
            usage_patterns: None,
            environment_data: None,
            mode: AnalysisMode::default(),
        }
    }
}

/// Response body of the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MaintenanceAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl AnalysisResponse {
    pub fn ok(analysis: MaintenanceAnalysis) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            error: None,
            retry_after: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            timestamp: None,
            error: Some(error.into()),
            retry_after: None,
        }
    }
}
