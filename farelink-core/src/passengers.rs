use serde::{Deserialize, Serialize};

use crate::host::PassengerValidator;
use crate::{CoreError, CoreResult};

/// Passenger mix as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassengerRequest {
    pub adults: u32,
    #[serde(default)]
    pub seniors: u32,
    /// Ages of the travelling children.
    #[serde(default)]
    pub children: Vec<u8>,
    #[serde(default)]
    pub infants_in_seat: u32,
    #[serde(default)]
    pub infants_in_lap: u32,
}

/// Booking-site limits a passenger mix is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaxRules {
    pub max_paxcount: u32,
    /// Whether lap infants count toward `max_paxcount`.
    pub count_inf: bool,
    /// Children this old or older are billed as adults.
    pub child_as_adult: u8,
    /// Keep infants in seat as their own category instead of billing them as children.
    pub sep_inf_seat: bool,
    pub child_min_age: u8,
}

impl Default for PaxRules {
    fn default() -> Self {
        Self {
            max_paxcount: 6,
            count_inf: true,
            child_as_adult: 12,
            sep_inf_seat: false,
            child_min_age: 2,
        }
    }
}

/// Validated passenger counts, in the categories the booking site bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCounts {
    pub adults: u32,
    pub children: Vec<u8>,
    pub infants_in_lap: u32,
    pub infants_in_seat: u32,
}

impl PassengerCounts {
    pub fn adults_only(adults: u32) -> Self {
        Self {
            adults,
            children: Vec::new(),
            infants_in_lap: 0,
            infants_in_seat: 0,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Validator over a fixed passenger request.
#[derive(Debug, Clone)]
pub struct StandardPassengerValidator {
    request: PassengerRequest,
}

impl StandardPassengerValidator {
    pub fn new(request: PassengerRequest) -> Self {
        Self { request }
    }
}

impl PassengerValidator for StandardPassengerValidator {
    fn validate(&self, rules: &PaxRules) -> CoreResult<PassengerCounts> {
        let req = &self.request;

        // Ageing children into adults never changes the head count, so the
        // limits are checked on the raw request before anything is built.
        let seated = u64::from(req.adults)
            + u64::from(req.seniors)
            + req.children.len() as u64
            + u64::from(req.infants_in_seat);
        let total = if rules.count_inf {
            seated + u64::from(req.infants_in_lap)
        } else {
            seated
        };

        if seated == 0 {
            tracing::warn!("Passenger validation failed: no passengers");
            return Err(CoreError::ValidationError("No passengers".to_string()));
        }
        if total > u64::from(rules.max_paxcount) {
            tracing::warn!(total, max = rules.max_paxcount, "Passenger validation failed: too many passengers");
            return Err(CoreError::ValidationError(format!(
                "Too many passengers: {} exceeds the maximum of {}",
                total, rules.max_paxcount
            )));
        }

        // Bounded by max_paxcount from here on.
        let mut adults = req.adults + req.seniors;
        let mut infants_in_seat = 0;

        let mut ages = req.children.clone();
        if rules.sep_inf_seat {
            infants_in_seat = req.infants_in_seat;
        } else {
            ages.extend(std::iter::repeat(rules.child_min_age).take(req.infants_in_seat as usize));
        }

        let mut children = Vec::with_capacity(ages.len());
        for age in ages {
            if age >= rules.child_as_adult {
                adults += 1;
            } else {
                children.push(age.max(rules.child_min_age));
            }
        }

        if req.infants_in_lap > adults {
            tracing::warn!("Passenger validation failed: more lap infants than adults");
            return Err(CoreError::ValidationError(
                "Each infant in lap needs an accompanying adult".to_string(),
            ));
        }

        Ok(PassengerCounts {
            adults,
            children,
            infants_in_lap: req.infants_in_lap,
            infants_in_seat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(request: PassengerRequest) -> CoreResult<PassengerCounts> {
        StandardPassengerValidator::new(request).validate(&PaxRules::default())
    }

    #[test]
    fn test_single_adult() {
        let counts = validate(PassengerRequest { adults: 1, ..Default::default() }).unwrap();
        assert_eq!(counts, PassengerCounts::adults_only(1));
    }

    #[test]
    fn test_too_many_adults() {
        let result = validate(PassengerRequest { adults: 8, ..Default::default() });
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_huge_counts_fail_without_overflow() {
        let result = validate(PassengerRequest {
            adults: u32::MAX,
            seniors: 1,
            ..Default::default()
        });
        assert!(matches!(result, Err(CoreError::ValidationError(_))));

        let rules = PaxRules { max_paxcount: u32::MAX, ..Default::default() };
        let request = PassengerRequest {
            adults: u32::MAX,
            seniors: u32::MAX,
            infants_in_seat: u32::MAX,
            infants_in_lap: u32::MAX,
            ..Default::default()
        };
        let result = StandardPassengerValidator::new(request).validate(&rules);
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_lap_infants_count_toward_max() {
        let request = PassengerRequest { adults: 5, infants_in_lap: 2, ..Default::default() };
        assert!(validate(request.clone()).is_err());

        let rules = PaxRules { count_inf: false, ..Default::default() };
        let counts = StandardPassengerValidator::new(request).validate(&rules).unwrap();
        assert_eq!(counts.adults, 5);
        assert_eq!(counts.infants_in_lap, 2);
    }

    #[test]
    fn test_older_children_billed_as_adults() {
        let request = PassengerRequest {
            adults: 1,
            seniors: 1,
            children: vec![14, 7, 1],
            ..Default::default()
        };
        let counts = validate(request).unwrap();
        assert_eq!(counts.adults, 3);
        // the one-year-old is billed at the minimum child age
        assert_eq!(counts.children, vec![7, 2]);
    }

    #[test]
    fn test_infants_in_seat_become_children() {
        let request = PassengerRequest { adults: 2, infants_in_seat: 1, ..Default::default() };
        let counts = validate(request.clone()).unwrap();
        assert_eq!(counts.children, vec![2]);
        assert_eq!(counts.infants_in_seat, 0);

        let rules = PaxRules { sep_inf_seat: true, ..Default::default() };
        let counts = StandardPassengerValidator::new(request).validate(&rules).unwrap();
        assert!(counts.children.is_empty());
        assert_eq!(counts.infants_in_seat, 1);
    }

    #[test]
    fn test_no_passengers() {
        assert!(validate(PassengerRequest::default()).is_err());
    }

    #[test]
    fn test_lap_infants_need_adults() {
        let request = PassengerRequest { adults: 1, infants_in_lap: 2, ..Default::default() };
        assert!(validate(request).is_err());
    }
}
