//! model — employee record schema.
//!
//! Persisted field names are camelCase; dates are ISO `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type EmployeeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Tech,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Junior,
    Medior,
    Senior,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Department::Tech => "Tech",
            Department::Analytics => "Analytics",
        })
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tech" => Ok(Department::Tech),
            "analytics" => Ok(Department::Analytics),
            other => Err(format!("unknown department '{}'", other)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Position::Junior => "Junior",
            Position::Medior => "Medior",
            Position::Senior => "Senior",
        })
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Position::Junior),
            "medior" => Ok(Position::Medior),
            "senior" => Ok(Position::Senior),
            other => Err(format!("unknown position '{}'", other)),
        }
    }
}

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_employment: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub department: Department,
    pub position: Position,
}

/// Record payload without an identifier; the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub date_of_employment: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub department: Department,
    pub position: Position,
}

impl NewEmployee {
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_employment: self.date_of_employment,
            date_of_birth: self.date_of_birth,
            phone: self.phone,
            email: self.email,
            department: self.department,
            position: self.position,
        }
    }
}

impl From<&Employee> for NewEmployee {
    fn from(e: &Employee) -> Self {
        Self {
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            date_of_employment: e.date_of_employment,
            date_of_birth: e.date_of_birth,
            phone: e.phone.clone(),
            email: e.email.clone(),
            department: e.department,
            position: e.position,
        }
    }
}

/// Shallow partial update: `None` fields are left untouched. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_employment: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: Option<Department>,
    pub position: Option<Position>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, e: &mut Employee) {
        if let Some(v) = &self.first_name {
            e.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            e.last_name = v.clone();
        }
        if let Some(v) = self.date_of_employment {
            e.date_of_employment = v;
        }
        if let Some(v) = self.date_of_birth {
            e.date_of_birth = v;
        }
        if let Some(v) = &self.phone {
            e.phone = v.clone();
        }
        if let Some(v) = &self.email {
            e.email = v.clone();
        }
        if let Some(v) = self.department {
            e.department = v;
        }
        if let Some(v) = self.position {
            e.position = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: 7,
            first_name: "John".into(),
            last_name: "Doe".into(),
            date_of_employment: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone: "+90 532 123 45 67".into(),
            email: "john@example.com".into(),
            department: Department::Tech,
            position: Position::Senior,
        }
    }

    #[test]
    fn patch_is_shallow() {
        let mut e = sample();
        let patch = EmployeePatch {
            first_name: Some("Jane".into()),
            position: Some(Position::Medior),
            ..Default::default()
        };
        patch.apply_to(&mut e);

        let mut expected = sample();
        expected.first_name = "Jane".into();
        expected.position = Position::Medior;
        assert_eq!(e, expected);
    }

    #[test]
    fn camel_case_wire_names() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["firstName"], "John");
        assert_eq!(v["dateOfEmployment"], "2023-01-01");
        assert_eq!(v["department"], "Tech");
    }

    #[test]
    fn patch_from_partial_json() {
        let p: EmployeePatch =
            serde_json::from_str(r#"{"firstName":"Jane","position":"Medior"}"#).unwrap();
        assert_eq!(p.first_name.as_deref(), Some("Jane"));
        assert_eq!(p.position, Some(Position::Medior));
        assert!(p.email.is_none());
        assert!(!p.is_empty());
        assert!(EmployeePatch::default().is_empty());
    }

    #[test]
    fn enums_parse_case_insensitive() {
        assert_eq!("tech".parse::<Department>().unwrap(), Department::Tech);
        assert_eq!(" Senior ".parse::<Position>().unwrap(), Position::Senior);
        assert!("Lead".parse::<Position>().is_err());
    }
}
