//! Child-Pugh score for cirrhosis mortality

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ascites {
    Absent,
    Slight,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encephalopathy {
    #[serde(rename = "none")]
    Absent,
    #[serde(rename = "grade_1_2")]
    Grade1To2,
    #[serde(rename = "grade_3_4")]
    Grade3To4,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChildPughScoreRequest {
    /// Total bilirubin, mg/dL
    #[validate(range(min = 0.1, max = 50.0))]
    pub total_bilirubin: f64,
    /// Serum albumin, g/dL
    #[validate(range(min = 1.0, max = 5.0))]
    pub serum_albumin: f64,
    #[validate(range(min = 0.8, max = 10.0))]
    pub inr: f64,
    pub ascites: Ascites,
    pub encephalopathy: Encephalopathy,
}

fn bilirubin_points(bilirubin: f64) -> i64 {
    if bilirubin < 2.0 {
        1
    } else if bilirubin <= 3.0 {
        2
    } else {
        3
    }
}

fn albumin_points(albumin: f64) -> i64 {
    if albumin > 3.5 {
        1
    } else if albumin >= 2.8 {
        2
    } else {
        3
    }
}

fn inr_points(inr: f64) -> i64 {
    if inr < 1.7 {
        1
    } else if inr <= 2.3 {
        2
    } else {
        3
    }
}

struct Grade {
    letter: char,
    description: &'static str,
    one_year_survival: u8,
    two_year_survival: u8,
    outlook: &'static str,
}

fn grade_for(score: i64) -> Grade {
    match score {
        i64::MIN..=6 => Grade {
            letter: 'A',
            description: "Well-compensated disease",
            one_year_survival: 100,
            two_year_survival: 85,
            outlook: "Low operative risk; major surgery and liver resection are generally tolerated.",
        },
        7..=9 => Grade {
            letter: 'B',
            description: "Significant functional compromise",
            one_year_survival: 80,
            two_year_survival: 60,
            outlook: "Moderate operative risk; proceed with surgery cautiously and consider transplant evaluation.",
        },
        _ => Grade {
            letter: 'C',
            description: "Decompensated disease",
            one_year_survival: 45,
            two_year_survival: 35,
            outlook: "High surgical mortality; prioritise evaluation for liver transplantation.",
        },
    }
}

pub struct ChildPughScore;

impl Calculator for ChildPughScore {
    const ID: &'static str = "child_pugh_score";
    type Params = ChildPughScoreRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Child-Pugh Score for Cirrhosis Mortality",
            description: "Estimates cirrhosis severity and prognosis from labs and clinical findings",
            category: "gastroenterology",
            version: None,
            references: &[
                "Pugh RN, Murray-Lyon IM, Dawson JL, Pietroni MC, Williams R. Transection of the oesophagus for bleeding oesophageal varices. Br J Surg. 1973;60(8):646-9.",
            ],
        }
    }

    fn example() -> ChildPughScoreRequest {
        ChildPughScoreRequest {
            total_bilirubin: 2.5,
            serum_albumin: 3.0,
            inr: 1.5,
            ascites: Ascites::Slight,
            encephalopathy: Encephalopathy::Absent,
        }
    }

    fn calculate(params: &ChildPughScoreRequest) -> Result<ScoreResult, CalcError> {
        let bilirubin = bilirubin_points(params.total_bilirubin);
        let albumin = albumin_points(params.serum_albumin);
        let inr = inr_points(params.inr);
        let ascites = match params.ascites {
            Ascites::Absent => 1,
            Ascites::Slight => 2,
            Ascites::Moderate => 3,
        };
        let encephalopathy = match params.encephalopathy {
            Encephalopathy::Absent => 1,
            Encephalopathy::Grade1To2 => 2,
            Encephalopathy::Grade3To4 => 3,
        };
        let score = bilirubin + albumin + inr + ascites + encephalopathy;
        let grade = grade_for(score);

        let interpretation = format!(
            "Child-Pugh class {} (score {}): {}. One-year survival ~{}%, two-year survival ~{}%. {}",
            grade.letter,
            score,
            grade.description.to_lowercase(),
            grade.one_year_survival,
            grade.two_year_survival,
            grade.outlook
        );

        Ok(ScoreResult::new(
            score,
            "points",
            interpretation,
            format!("Child-Pugh {}", grade.letter),
            grade.description,
        )
        .with("one_year_survival", json!(grade.one_year_survival))
        .with("two_year_survival", json!(grade.two_year_survival))
        .with(
            "scoring_breakdown",
            json!({
                "total_bilirubin": bilirubin,
                "serum_albumin": albumin,
                "inr": inr,
                "ascites": ascites,
                "encephalopathy": encephalopathy,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_typed;
    use crate::models::ScoreValue;

    #[test]
    fn test_example_is_class_b() {
        // 2 + 2 + 1 + 2 + 1
        let result = ChildPughScore::calculate(&ChildPughScore::example()).unwrap();
        assert_eq!(result.result, ScoreValue::Integer(8));
        assert_eq!(result.stage, "Child-Pugh B");
    }

    #[test]
    fn test_lab_thresholds() {
        assert_eq!(bilirubin_points(1.99), 1);
        assert_eq!(bilirubin_points(2.0), 2);
        assert_eq!(bilirubin_points(3.0), 2);
        assert_eq!(albumin_points(3.5), 2);
        assert_eq!(albumin_points(2.8), 2);
        assert_eq!(albumin_points(2.79), 3);
        assert_eq!(inr_points(1.7), 2);
        assert_eq!(inr_points(2.31), 3);
    }

    #[test]
    fn test_grade_edges() {
        assert_eq!(grade_for(6).letter, 'A');
        assert_eq!(grade_for(7).letter, 'B');
        assert_eq!(grade_for(9).letter, 'B');
        assert_eq!(grade_for(10).letter, 'C');
    }

    #[test]
    fn test_encephalopathy_wire_names() {
        let params: ChildPughScoreRequest = serde_json::from_value(json!({
            "total_bilirubin": 4.0,
            "serum_albumin": 2.5,
            "inr": 2.5,
            "ascites": "moderate",
            "encephalopathy": "grade_3_4"
        }))
        .unwrap();
        let result = run_typed::<ChildPughScore>(&params).unwrap();
        assert_eq!(result.result, ScoreValue::Integer(15));
        assert_eq!(result.stage, "Child-Pugh C");
    }
}
