use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{PeopleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Backend code for this gender
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Parse a backend gender code. Unknown or missing codes yield `None`.
    pub fn parse(code: Option<&str>) -> Option<Self> {
        match code? {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub enum AccountType {
    #[serde(rename = "Student")]
    Student,
    #[serde(rename = "Teacher")]
    Teacher,
    // The backend's own role code for parents
    #[serde(rename = "Rodic")]
    Parent,
}

impl AccountType {
    /// Role string the backend uses for this account type
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Student => "Student",
            AccountType::Teacher => "Teacher",
            AccountType::Parent => "Rodic",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity shared by every kind of account.
///
/// Fields are read-only after construction: `new` is the only way in and it
/// rejects non-positive ids and blank names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct Account {
    person_id: i64,
    name: String,
    gender: Option<Gender>,
    in_school_since: Option<NaiveDate>,
    account_type: AccountType,
}

impl Account {
    pub fn new(
        person_id: i64,
        name: impl Into<String>,
        gender: Option<Gender>,
        in_school_since: Option<NaiveDate>,
        account_type: AccountType,
    ) -> Result<Self> {
        if person_id <= 0 {
            return Err(PeopleError::malformed(person_id, "person_id", &person_id.to_string()));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PeopleError::missing(person_id, "name"));
        }
        Ok(Self {
            person_id,
            name,
            gender,
            in_school_since,
            account_type,
        })
    }

    pub fn person_id(&self) -> i64 {
        self.person_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn in_school_since(&self) -> Option<NaiveDate> {
        self.in_school_since
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Composite key, e.g. `Teacher-42`, stable across retrievals
    pub fn get_id(&self) -> String {
        format!("{}-{}", self.account_type, self.person_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct Student {
    #[serde(flatten)]
    account: Account,
    class_id: Option<i64>,
    number_in_class: Option<i64>,
}

impl Student {
    pub fn new(
        person_id: i64,
        name: impl Into<String>,
        gender: Option<Gender>,
        in_school_since: Option<NaiveDate>,
        class_id: Option<i64>,
        number_in_class: Option<i64>,
    ) -> Result<Self> {
        let account = Account::new(person_id, name, gender, in_school_since, AccountType::Student)?;
        Ok(Self {
            account,
            class_id,
            number_in_class,
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn class_id(&self) -> Option<i64> {
        self.class_id
    }

    pub fn number_in_class(&self) -> Option<i64> {
        self.number_in_class
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct Parent {
    #[serde(flatten)]
    account: Account,
}

impl Parent {
    pub fn new(
        person_id: i64,
        name: impl Into<String>,
        gender: Option<Gender>,
        in_school_since: Option<NaiveDate>,
    ) -> Result<Self> {
        let account = Account::new(person_id, name, gender, in_school_since, AccountType::Parent)?;
        Ok(Self { account })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct Teacher {
    #[serde(flatten)]
    account: Account,
    /// Empty when the teacher has no classroom of their own
    classroom_name: String,
}

impl Teacher {
    pub fn new(
        person_id: i64,
        name: impl Into<String>,
        gender: Gender,
        in_school_since: NaiveDate,
        classroom_name: impl Into<String>,
    ) -> Result<Self> {
        let account = Account::new(
            person_id,
            name,
            Some(gender),
            Some(in_school_since),
            AccountType::Teacher,
        )?;
        Ok(Self {
            account,
            classroom_name: classroom_name.into(),
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn classroom_name(&self) -> &str {
        &self.classroom_name
    }

    pub fn has_classroom(&self) -> bool {
        !self.classroom_name.is_empty()
    }
}

/// Any account in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Person {
    Student(Student),
    Teacher(Teacher),
    Parent(Parent),
}

impl Person {
    pub fn account(&self) -> &Account {
        match self {
            Person::Student(s) => s.account(),
            Person::Teacher(t) => t.account(),
            Person::Parent(p) => p.account(),
        }
    }

    pub fn get_id(&self) -> String {
        self.account().get_id()
    }

    pub fn account_type(&self) -> AccountType {
        self.account().account_type()
    }
}

impl From<Student> for Person {
    fn from(student: Student) -> Self {
        Person::Student(student)
    }
}

impl From<Teacher> for Person {
    fn from(teacher: Teacher) -> Self {
        Person::Teacher(teacher)
    }
}

impl From<Parent> for Person {
    fn from(parent: Parent) -> Self {
        Person::Parent(parent)
    }
}

// Sorting options for people listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonSortColumn {
    Name,
    Id,
    Since,
}

impl PersonSortColumn {
    /// Stable sort; people without a start date go last when sorting by `Since`
    pub fn sort(&self, people: &mut [Person]) {
        match self {
            PersonSortColumn::Name => people.sort_by(|a, b| {
                crate::utils::cmp_ignore_case(a.account().name(), b.account().name())
            }),
            PersonSortColumn::Id => {
                people.sort_by_key(|p| (p.account().person_id(), p.account_type().as_str()))
            }
            PersonSortColumn::Since => people.sort_by_key(|p| {
                let since = p.account().in_school_since();
                (since.is_none(), since)
            }),
        }
    }
}
