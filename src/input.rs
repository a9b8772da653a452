//! Input document: parsing, validation and normalization.
//!
//! [`AlgorithmInput`] mirrors the JSON document a caller sends.
//! [`AlgorithmInput::prepare`] checks it and turns it into the
//! [`IdcSelectionProblem`] the search runs on, plus the two score tables the
//! resolver needs.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::problem::{Candidate, CoverageRule, Country, IdcSelectionProblem, PingTable};
use crate::resolve::{ScoreRange, ScoreTable};

/// Raw recommendation request.
///
/// Keys are snake_case; the upper-case names (`IDC_LIST`, `PING_INFO`, …)
/// are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmInput {
    /// Candidate IDC identifiers, in decision-vector order.
    #[serde(alias = "IDC_LIST")]
    pub idc_list: Vec<String>,

    /// Ping in milliseconds, `country → idc → ms`.
    #[serde(alias = "PING_INFO")]
    pub ping_info: BTreeMap<String, BTreeMap<String, f64>>,

    /// Raw player share per country. Normalized to sum to 1 by
    /// [`prepare`](Self::prepare).
    #[serde(alias = "COUNTRY_RATE", alias = "COUNTRY_RATE_ORIGIN")]
    pub country_rate: BTreeMap<String, f64>,

    /// Unit price per IDC.
    #[serde(alias = "IDC_PRICE")]
    pub idc_price: BTreeMap<String, f64>,

    /// IDCs every recommendation must contain.
    #[serde(default, alias = "PICK_IDC_LIST")]
    pub pick_idc_list: Vec<String>,

    /// IDCs no recommendation may contain.
    #[serde(default, alias = "BAN_IDC_LIST")]
    pub ban_idc_list: Vec<String>,

    /// Latency threshold (ms) under which a country counts as covered.
    #[serde(alias = "COVER_PING")]
    pub cover_ping: f64,

    /// Required covered player share, in `[0, 1]`.
    #[serde(alias = "COVER_RATE")]
    pub cover_rate: f64,

    /// Score buckets for F1.
    #[serde(alias = "COVER_PING_RANGES")]
    pub cover_ping_ranges: Vec<ScoreRange>,

    /// Score buckets for F2.
    #[serde(alias = "IDC_PRICE_RANGES")]
    pub idc_price_ranges: Vec<ScoreRange>,
}

/// A validated request, ready for search.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    pub problem: IdcSelectionProblem,
    pub latency_scores: ScoreTable,
    pub cost_scores: ScoreTable,
}

impl AlgorithmInput {
    /// Reads a document from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        serde_json::from_reader(reader).map_err(InputError::from_json)
    }

    /// Parses a document from a string.
    pub fn from_json_str(s: &str) -> Result<Self, InputError> {
        serde_json::from_str(s).map_err(InputError::from_json)
    }

    /// Checks every cross-field and range rule.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.idc_list.is_empty() {
            return Err(InputError::EmptyIdcList);
        }
        let mut idcs = HashSet::with_capacity(self.idc_list.len());
        for idc in &self.idc_list {
            if !idcs.insert(idc.as_str()) {
                return Err(InputError::DuplicateIdc(idc.clone()));
            }
            let price = self
                .idc_price
                .get(idc)
                .copied()
                .ok_or_else(|| InputError::MissingPrice(idc.clone()))?;
            if !(price.is_finite() && price >= 0.0) {
                return Err(InputError::InvalidPrice {
                    idc: idc.clone(),
                    value: price,
                });
            }
        }

        if self.country_rate.is_empty() {
            return Err(InputError::EmptyCountryRate);
        }
        for (country, &share) in &self.country_rate {
            if !(share.is_finite() && share > 0.0) {
                return Err(InputError::InvalidShare {
                    country: country.clone(),
                    value: share,
                });
            }
            let row = self
                .ping_info
                .get(country)
                .ok_or_else(|| InputError::MissingPingInfo(country.clone()))?;
            for (idc, &ping) in row {
                if idcs.contains(idc.as_str()) && !(ping.is_finite() && ping >= 0.0) {
                    return Err(InputError::InvalidPing {
                        country: country.clone(),
                        idc: idc.clone(),
                        value: ping,
                    });
                }
            }
        }

        for idc in &self.pick_idc_list {
            if !idcs.contains(idc.as_str()) {
                return Err(InputError::UnknownPick(idc.clone()));
            }
        }
        for idc in &self.ban_idc_list {
            if !idcs.contains(idc.as_str()) {
                return Err(InputError::UnknownBan(idc.clone()));
            }
            if self.pick_idc_list.contains(idc) {
                return Err(InputError::PickedAndBanned(idc.clone()));
            }
        }

        if !(0.0..=1.0).contains(&self.cover_rate) {
            return Err(InputError::InvalidCoverRate(self.cover_rate));
        }
        if !(self.cover_ping.is_finite() && self.cover_ping >= 0.0) {
            return Err(InputError::InvalidCoverPing(self.cover_ping));
        }

        check_ranges("cover_ping_ranges", &self.cover_ping_ranges)?;
        check_ranges("idc_price_ranges", &self.idc_price_ranges)?;

        let banned: HashSet<&str> = self.ban_idc_list.iter().map(String::as_str).collect();
        if self.idc_list.iter().all(|idc| banned.contains(idc.as_str())) {
            return Err(InputError::NoCandidates);
        }
        Ok(())
    }

    /// Validates the request and builds the search problem.
    ///
    /// Banned IDCs are removed from the candidate set, so they never appear
    /// in a decision vector. Country shares are divided by their sum.
    pub fn prepare(&self) -> Result<PreparedInput, InputError> {
        self.validate()?;

        let banned: HashSet<&str> = self.ban_idc_list.iter().map(String::as_str).collect();
        let candidates: Vec<Candidate> = self
            .idc_list
            .iter()
            .filter(|idc| !banned.contains(idc.as_str()))
            .map(|idc| Candidate {
                name: idc.clone(),
                price: self.idc_price[idc],
            })
            .collect();

        let total: f64 = self.country_rate.values().sum();
        let countries: Vec<Country> = self
            .country_rate
            .iter()
            .map(|(name, share)| Country {
                name: name.clone(),
                weight: share / total,
            })
            .collect();

        let mut pings = PingTable::new(countries.len(), candidates.len());
        for (c, country) in countries.iter().enumerate() {
            let row = &self.ping_info[&country.name];
            for (i, candidate) in candidates.iter().enumerate() {
                if let Some(&ping) = row.get(&candidate.name) {
                    pings.set(c, i, ping);
                }
            }
        }

        let mut mandatory: Vec<usize> = self
            .pick_idc_list
            .iter()
            .filter_map(|pick| candidates.iter().position(|c| &c.name == pick))
            .collect();
        mandatory.sort_unstable();
        mandatory.dedup();

        let coverage = CoverageRule {
            ping_threshold: self.cover_ping,
            required_rate: self.cover_rate,
        };

        Ok(PreparedInput {
            problem: IdcSelectionProblem::new(candidates, countries, pings, mandatory, coverage),
            latency_scores: ScoreTable::new(self.cover_ping_ranges.clone()),
            cost_scores: ScoreTable::new(self.idc_price_ranges.clone()),
        })
    }
}

fn check_ranges(table: &'static str, ranges: &[ScoreRange]) -> Result<(), InputError> {
    for (index, entry) in ranges.iter().enumerate() {
        let [low, high] = entry.range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(InputError::InvalidScoreRange {
                table,
                index,
                low,
                high,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "idc_list": ["A", "B", "C"],
            "ping_info": {
                "kr": {"A": 10.0, "B": 80.0, "C": 35.0, "Z": 1.0},
                "jp": {"A": 50.0, "B": 20.0}
            },
            "country_rate": {"kr": 3.0, "jp": 2.0},
            "idc_price": {"A": 5.0, "B": 3.0, "C": 4.0},
            "cover_ping": 60.0,
            "cover_rate": 0.5,
            "cover_ping_ranges": [{"range": [0, 30], "score": 100}],
            "idc_price_ranges": [{"range": [0, 10], "score": 80}]
        })
    }

    fn parse(value: serde_json::Value) -> AlgorithmInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_for_pick_and_ban() {
        let input = parse(document());
        assert!(input.pick_idc_list.is_empty());
        assert!(input.ban_idc_list.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_upper_case_aliases() {
        let input = AlgorithmInput::from_json_str(
            r#"{
                "IDC_LIST": ["A"],
                "PING_INFO": {"kr": {"A": 12}},
                "COUNTRY_RATE": {"kr": 1},
                "IDC_PRICE": {"A": 2},
                "PICK_IDC_LIST": ["A"],
                "BAN_IDC_LIST": [],
                "COVER_PING": 50,
                "COVER_RATE": 0.9,
                "COVER_PING_RANGES": [],
                "IDC_PRICE_RANGES": []
            }"#,
        )
        .unwrap();
        assert_eq!(input.idc_list, vec!["A"]);
        assert_eq!(input.pick_idc_list, vec!["A"]);
        assert!((input.cover_rate - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("cover_rate");
        let err = AlgorithmInput::from_json_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, InputError::Schema(_)));
    }

    #[test]
    fn test_broken_stream_is_malformed() {
        let err = AlgorithmInput::from_reader("{\"idc_list\": [".as_bytes()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_prepare_normalizes_shares() {
        let prepared = parse(document()).prepare().unwrap();
        let countries = prepared.problem.countries();
        // BTreeMap order: jp before kr.
        assert_eq!(countries[0].name, "jp");
        assert!((countries[0].weight - 0.4).abs() < 1e-12);
        assert_eq!(countries[1].name, "kr");
        assert!((countries[1].weight - 0.6).abs() < 1e-12);
        let total: f64 = countries.iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_prepare_filters_banned() {
        let mut doc = document();
        doc["ban_idc_list"] = json!(["B"]);
        doc["pick_idc_list"] = json!(["C"]);
        let prepared = parse(doc).prepare().unwrap();

        let names: Vec<&str> = prepared
            .problem
            .candidates()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(prepared.problem.mandatory(), &[1]);
    }

    #[test]
    fn test_prepare_builds_score_tables() {
        let prepared = parse(document()).prepare().unwrap();
        assert_eq!(prepared.latency_scores.lookup(12.0), 100.0);
        assert_eq!(prepared.cost_scores.lookup(12.0), -1.0);
    }

    #[test]
    fn test_rejects_empty_idc_list() {
        let mut doc = document();
        doc["idc_list"] = json!([]);
        assert!(matches!(parse(doc).validate(), Err(InputError::EmptyIdcList)));
    }

    #[test]
    fn test_rejects_duplicate_idc() {
        let mut doc = document();
        doc["idc_list"] = json!(["A", "B", "A"]);
        assert!(matches!(parse(doc).validate(), Err(InputError::DuplicateIdc(id)) if id == "A"));
    }

    #[test]
    fn test_rejects_missing_price() {
        let mut doc = document();
        doc["idc_price"] = json!({"A": 5.0, "B": 3.0});
        assert!(matches!(parse(doc).validate(), Err(InputError::MissingPrice(id)) if id == "C"));
    }

    #[test]
    fn test_rejects_country_without_pings() {
        let mut doc = document();
        doc["country_rate"]["us"] = json!(1.0);
        assert!(matches!(
            parse(doc).validate(),
            Err(InputError::MissingPingInfo(c)) if c == "us"
        ));
    }

    #[test]
    fn test_rejects_bad_share() {
        let mut doc = document();
        doc["country_rate"]["kr"] = json!(0.0);
        assert!(matches!(parse(doc).validate(), Err(InputError::InvalidShare { .. })));
    }

    #[test]
    fn test_rejects_empty_country_rate() {
        let mut doc = document();
        doc["country_rate"] = json!({});
        assert!(matches!(parse(doc).validate(), Err(InputError::EmptyCountryRate)));
    }

    #[test]
    fn test_rejects_negative_ping_and_price() {
        let mut doc = document();
        doc["ping_info"]["jp"]["A"] = json!(-1.0);
        assert!(matches!(parse(doc).validate(), Err(InputError::InvalidPing { .. })));

        let mut doc = document();
        doc["idc_price"]["B"] = json!(-3.0);
        assert!(matches!(parse(doc).validate(), Err(InputError::InvalidPrice { .. })));
    }

    #[test]
    fn test_ignores_pings_to_unknown_idcs() {
        let mut doc = document();
        doc["ping_info"]["kr"]["Z"] = json!(-5.0);
        assert!(parse(doc).validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_pick_and_ban() {
        let mut doc = document();
        doc["pick_idc_list"] = json!(["Q"]);
        assert!(matches!(parse(doc).validate(), Err(InputError::UnknownPick(_))));

        let mut doc = document();
        doc["ban_idc_list"] = json!(["Q"]);
        assert!(matches!(parse(doc).validate(), Err(InputError::UnknownBan(_))));
    }

    #[test]
    fn test_rejects_picked_and_banned() {
        let mut doc = document();
        doc["pick_idc_list"] = json!(["A"]);
        doc["ban_idc_list"] = json!(["A"]);
        assert!(matches!(
            parse(doc).validate(),
            Err(InputError::PickedAndBanned(id)) if id == "A"
        ));
    }

    #[test]
    fn test_rejects_cover_settings() {
        let mut doc = document();
        doc["cover_rate"] = json!(1.2);
        assert!(matches!(parse(doc).validate(), Err(InputError::InvalidCoverRate(_))));

        let mut doc = document();
        doc["cover_ping"] = json!(-10.0);
        assert!(matches!(parse(doc).validate(), Err(InputError::InvalidCoverPing(_))));
    }

    #[test]
    fn test_rejects_inverted_score_range() {
        let mut doc = document();
        doc["idc_price_ranges"] = json!([
            {"range": [0, 10], "score": 80},
            {"range": [20, 20], "score": 60}
        ]);
        let err = parse(doc).validate().unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidScoreRange {
                table: "idc_price_ranges",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_everything_banned() {
        let mut doc = document();
        doc["ban_idc_list"] = json!(["A", "B", "C"]);
        assert!(matches!(parse(doc).validate(), Err(InputError::NoCandidates)));
    }
}
