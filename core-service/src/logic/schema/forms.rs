//! Built-in Disease Forms
//!
//! **Field order is the trained feature order of each classifier.**
//! Reordering, adding or removing a field changes the schema fingerprint
//! and must go together with a retrained model artifact.

use super::types::{FieldSpec, FormSchema, SchemaError, VerdictMap};

pub const DIABETES: &str = "diabetes";
pub const HEART: &str = "heart";
pub const PARKINSONS: &str = "parkinsons";
pub const BREAST_CANCER: &str = "breast_cancer";

/// All built-in form ids, in menu order
pub const BUILTIN_IDS: &[&str] = &[DIABETES, HEART, PARKINSONS, BREAST_CANCER];

// ============================================================================
// DIABETES (8)
// ============================================================================

pub fn diabetes() -> Result<(FormSchema, VerdictMap), SchemaError> {
    let fields = vec![
        FieldSpec::integer("Number of Pregnancies").with_example("0"),
        FieldSpec::real("Glucose Level (mg/dL)").with_example("120"),
        FieldSpec::real("Blood Pressure (mmHg)").with_example("80"),
        FieldSpec::real("Skin Thickness (mm)").with_example("20"),
        FieldSpec::real("Insulin Level (µIU/mL)").with_example("85"),
        FieldSpec::real("Body Mass Index (BMI)").with_example("24.5"),
        FieldSpec::real("Diabetes Pedigree Function").with_example("0.45"),
        FieldSpec::integer("Age (years)").with_example("30"),
    ];

    let schema = FormSchema::new(DIABETES, "Diabetes Prediction", fields)?
        .with_subtitle("AI-based diabetes risk assessment");
    let verdicts = VerdictMap::new("The person is not diabetic", "The person is diabetic");
    Ok((schema, verdicts))
}

// ============================================================================
// HEART DISEASE (13)
// ============================================================================

pub fn heart() -> Result<(FormSchema, VerdictMap), SchemaError> {
    // Categorical codes are still submitted as reals; the classifier was
    // trained on float columns.
    let fields = vec![
        FieldSpec::real("Age (years)").with_example("45"),
        FieldSpec::real("Sex (1 = Male, 0 = Female)").with_example("1"),
        FieldSpec::real("Chest Pain Type (0-3)").with_example("2"),
        FieldSpec::real("Resting Blood Pressure (mm Hg)").with_example("130"),
        FieldSpec::real("Serum Cholesterol (mg/dL)").with_example("250"),
        FieldSpec::real("Fasting Blood Sugar > 120 mg/dL (1 = True, 0 = False)").with_example("0"),
        FieldSpec::real("Resting ECG Results (0-2)").with_example("1"),
        FieldSpec::real("Maximum Heart Rate Achieved").with_example("150"),
        FieldSpec::real("Exercise Induced Angina (1 = Yes, 0 = No)").with_example("0"),
        FieldSpec::real("ST Depression Induced by Exercise").with_example("1.2"),
        FieldSpec::real("Slope of Peak Exercise ST Segment (0-2)").with_example("1"),
        FieldSpec::real("Number of Major Vessels (0-4)").with_example("0"),
        FieldSpec::real("Thalassemia (1 = Normal, 2 = Fixed Defect, 3 = Reversible)").with_example("2"),
    ];

    let schema = FormSchema::new(HEART, "Heart Disease Prediction", fields)?
        .with_subtitle("Clinical parameters based heart risk analysis");
    let verdicts = VerdictMap::new("No heart disease detected", "Heart disease detected");
    Ok((schema, verdicts))
}

// ============================================================================
// PARKINSON'S (22 voice measurements)
// ============================================================================

const PARKINSONS_FEATURES: [&str; 22] = [
    "MDVP:Fo(Hz)", "MDVP:Fhi(Hz)", "MDVP:Flo(Hz)",
    "MDVP:Jitter(%)", "MDVP:Jitter(Abs)", "MDVP:RAP",
    "MDVP:PPQ", "Jitter:DDP", "MDVP:Shimmer",
    "MDVP:Shimmer(dB)", "Shimmer:APQ3", "Shimmer:APQ5",
    "MDVP:APQ", "Shimmer:DDA", "NHR", "HNR",
    "RPDE", "DFA", "spread1", "spread2", "D2", "PPE",
];

pub fn parkinsons() -> Result<(FormSchema, VerdictMap), SchemaError> {
    let fields = PARKINSONS_FEATURES
        .iter()
        .map(|name| FieldSpec::real(*name).with_example("0.012"))
        .collect();

    let schema = FormSchema::new(PARKINSONS, "Parkinson's Disease Prediction", fields)?
        .with_subtitle("Voice-based biomedical analysis");
    let verdicts = VerdictMap::new(
        "Person is NOT likely to have Parkinson's disease",
        "Person is likely to have Parkinson's disease",
    );
    Ok((schema, verdicts))
}

// ============================================================================
// BREAST CANCER (30 = mean / error / worst x 10)
// ============================================================================

const NUCLEUS_MEASUREMENTS: [&str; 10] = [
    "Radius", "Texture", "Perimeter", "Area", "Smoothness",
    "Compactness", "Concavity", "Concave Points", "Symmetry", "Fractal Dimension",
];

pub fn breast_cancer() -> Result<(FormSchema, VerdictMap), SchemaError> {
    let mut fields = Vec::with_capacity(NUCLEUS_MEASUREMENTS.len() * 3);
    for m in NUCLEUS_MEASUREMENTS {
        fields.push(FieldSpec::real(format!("Mean {m}")).with_example("14.5"));
    }
    for m in NUCLEUS_MEASUREMENTS {
        fields.push(FieldSpec::real(format!("{m} Error")).with_example("0.4"));
    }
    for m in NUCLEUS_MEASUREMENTS {
        fields.push(FieldSpec::real(format!("Worst {m}")).with_example("16.3"));
    }

    let schema = FormSchema::new(BREAST_CANCER, "Breast Cancer Prediction", fields)?
        .with_subtitle("Cell nucleus measurements from a fine needle aspirate");
    let verdicts = VerdictMap::new("Benign tumor", "Malignant tumor detected");
    Ok((schema, verdicts))
}

/// Every built-in form, in menu order
pub fn all() -> Result<Vec<(FormSchema, VerdictMap)>, SchemaError> {
    Ok(vec![diabetes()?, heart()?, parkinsons()?, breast_cancer()?])
}
