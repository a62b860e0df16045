use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};

use crate::error::ValidationError;

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub enum Day {
  #[serde(alias = "Segunda")]
  Monday,
  #[serde(alias = "Terça")]
  Tuesday,
  #[serde(alias = "Quarta")]
  Wednesday,
  #[serde(alias = "Quinta")]
  Thursday,
  #[serde(alias = "Sexta")]
  Friday,
  #[serde(alias = "Sábado")]
  Saturday,
  #[serde(alias = "Domingo")]
  Sunday
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum Locale {
  #[default]
  En,
  Pt
}

impl Day {
  pub const ALL: [Day; 7] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
    Day::Sunday
  ];

  pub fn name(self) -> &'static str {
    match self {
      | Day::Monday => "Monday",
      | Day::Tuesday => "Tuesday",
      | Day::Wednesday => "Wednesday",
      | Day::Thursday => "Thursday",
      | Day::Friday => "Friday",
      | Day::Saturday => "Saturday",
      | Day::Sunday => "Sunday"
    }
  }

  /// CSS class used by the grid column.
  pub fn css_class(self) -> &'static str {
    match self {
      | Day::Monday => "monday",
      | Day::Tuesday => "tuesday",
      | Day::Wednesday => "wednesday",
      | Day::Thursday => "thursday",
      | Day::Friday => "friday",
      | Day::Saturday => "saturday",
      | Day::Sunday => "sunday"
    }
  }

  pub fn is_weekend(self) -> bool {
    matches!(
      self,
      Day::Saturday | Day::Sunday
    )
  }

  pub fn label(
    self,
    locale: Locale
  ) -> &'static str {
    match locale {
      | Locale::En => self.name(),
      | Locale::Pt => {
        match self {
          | Day::Monday => "Segunda",
          | Day::Tuesday => "Terça",
          | Day::Wednesday => "Quarta",
          | Day::Thursday => "Quinta",
          | Day::Friday => "Sexta",
          | Day::Saturday => "Sábado",
          | Day::Sunday => "Domingo"
        }
      }
    }
  }

  /// Column header text. Portuguese weekdays carry the `-feira`
  /// suffix, weekend days never do.
  pub fn header(
    self,
    locale: Locale
  ) -> String {
    let label = self.label(locale);
    match locale {
      | Locale::Pt
        if !self.is_weekend() =>
      {
        format!("{label}-feira")
      }
      | _ => label.to_string()
    }
  }
}

impl fmt::Display for Day {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Day {
  type Err = ValidationError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let token =
      s.trim().to_lowercase();
    let token = token
      .strip_suffix("-feira")
      .unwrap_or(&token);
    match token {
      | "monday" | "mon" | "segunda" => {
        Ok(Day::Monday)
      }
      | "tuesday" | "tue" | "tues"
      | "terça" | "terca" => {
        Ok(Day::Tuesday)
      }
      | "wednesday" | "wed"
      | "quarta" => Ok(Day::Wednesday),
      | "thursday" | "thu" | "thur"
      | "thurs" | "quinta" => {
        Ok(Day::Thursday)
      }
      | "friday" | "fri" | "sexta" => {
        Ok(Day::Friday)
      }
      | "saturday" | "sat"
      | "sábado" | "sabado" => {
        Ok(Day::Saturday)
      }
      | "sunday" | "sun"
      | "domingo" => Ok(Day::Sunday),
      | "" => {
        Err(ValidationError::MissingDay)
      }
      | _ => {
        Err(
          ValidationError::UnknownDay(
            s.trim().to_string()
          )
        )
      }
    }
  }
}

impl FromStr for Locale {
  type Err = ValidationError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "en" | "en-us" | "en_us" => {
        Ok(Locale::En)
      }
      | "pt" | "pt-br" | "pt_br" => {
        Ok(Locale::Pt)
      }
      | other => {
        Err(
          ValidationError::UnknownLocale(
            other.to_string()
          )
        )
      }
    }
  }
}
