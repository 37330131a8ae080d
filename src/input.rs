//! Serializable problem definition.
//!
//! Describes a timetabling problem the way school staff fill it in: weekly
//! hour loads per (class, subject, teacher), optional preference rows for
//! teachers and subjects, numbered day patterns of slot codes, and a
//! pattern number per class and weekday. [`ProblemDefinition::build`]
//! turns it into a [`Registry`] and a [`SlotTemplate`].
//!
//! # Conventions
//!
//! | Input | Meaning |
//! |-------|---------|
//! | load `3` | three lessons |
//! | load `2.5` | two lessons plus one blinking lesson |
//! | flag `+`, `1`, `true`, `yes` | true (case-insensitive); anything else false |
//! | missing number in a preference row | 0 |
//! | no preference row | entity defaults |
//! | day `0`, `-`, empty or missing | all slots EMPTY |
//! | unknown pattern number | all slots EMPTY, logged as a warning |
//!
//! # Example
//! ```
//! use u_timetable::input::ProblemDefinition;
//!
//! let json = r#"{
//!     "lessons_per_day": 3,
//!     "classes": ["5-A"],
//!     "hours": [{ "class": "5-A", "subject": "Math", "teacher": "Bondar B.B.", "load": 1.5 }],
//!     "day_patterns": { "1": "OOW" },
//!     "class_days": { "5-A": [1, 1, "-", 1, 1] }
//! }"#;
//! let definition: ProblemDefinition = serde_json::from_str(json).unwrap();
//! let (registry, template) = definition.build().unwrap();
//! assert_eq!(registry.lessons().len(), 2);
//! assert_eq!(template.len(), 1);
//! ```

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::PenaltyWeights;
use crate::error::TimetableError;
use crate::ga::TimetableProblem;
use crate::models::{
    ClassId, Lesson, Registry, SchoolClass, SlotTemplate, SlotType, Subject, SubjectId, Teacher,
    TeacherId, DAYS_PER_WEEK,
};

/// Whether a free-text token means "yes".
pub fn is_truthy(token: &str) -> bool {
    matches!(
        token.trim().to_lowercase().as_str(),
        "+" | "1" | "true" | "yes"
    )
}

/// A boolean preference as entered: a real bool, a number, or a token.
///
/// Only the integer `1` counts as set among numbers; a float such as `1.0`
/// reads as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(i64),
    Float(f64),
    Text(String),
}

impl Flag {
    /// Interprets the flag with the truthy-token rule.
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n == 1,
            Flag::Float(_) => false,
            Flag::Text(s) => is_truthy(s),
        }
    }
}

fn flag(value: &Option<Flag>) -> bool {
    value.as_ref().is_some_and(Flag::is_set)
}

/// Preference row of one teacher.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherPreferences {
    pub name: String,
    pub can_offline: Option<Flag>,
    pub travel_time: Option<usize>,
    pub wants_windows: Option<Flag>,
    pub max_online_from_school: Option<u32>,
}

impl TeacherPreferences {
    fn apply(&self, teacher: Teacher) -> Teacher {
        teacher
            .with_can_offline(flag(&self.can_offline))
            .with_travel_time(self.travel_time.unwrap_or(0))
            .with_wants_windows(flag(&self.wants_windows))
            .with_max_online_from_school(self.max_online_from_school.unwrap_or(0))
    }
}

/// Preference row of one subject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectPreferences {
    pub name: String,
    pub priority_offline: Option<Flag>,
    pub difficulty: Option<u32>,
    pub preferred_stack: Option<usize>,
    pub max_stack: Option<usize>,
    pub max_per_day: Option<usize>,
}

impl SubjectPreferences {
    fn apply(&self, subject: Subject) -> Subject {
        subject
            .with_priority_offline(flag(&self.priority_offline))
            .with_difficulty(self.difficulty.unwrap_or(0))
            .with_stack(self.max_stack.unwrap_or(0), self.preferred_stack.unwrap_or(0))
            .with_max_per_day(self.max_per_day.unwrap_or(0))
    }
}

/// Weekly hours of one subject taught by one teacher to one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    pub class: String,
    pub subject: String,
    pub teacher: String,
    /// Lessons per week; a fractional part adds one blinking lesson.
    pub load: f64,
}

impl HourEntry {
    /// `(regular, blinking)` lesson counts of this load.
    pub fn lesson_counts(&self) -> Result<(usize, bool), TimetableError> {
        if !self.load.is_finite() || self.load < 0.0 {
            return Err(TimetableError::InvalidConfig(format!(
                "load of {} / {} / {} must be a non-negative number (got {})",
                self.class, self.subject, self.teacher, self.load
            )));
        }
        Ok((self.load.trunc() as usize, self.load.fract() > 0.0))
    }
}

/// Pattern reference of one weekday: a pattern number or a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayRef {
    Number(u32),
    Text(String),
}

impl DayRef {
    /// Pattern number, or `None` for an explicitly empty day.
    ///
    /// # Errors
    /// The offending text when it is neither empty nor a number.
    fn pattern(&self) -> Result<Option<u32>, &str> {
        match self {
            DayRef::Number(0) => Ok(None),
            DayRef::Number(n) => Ok(Some(*n)),
            DayRef::Text(s) => match s.trim() {
                "" | "0" | "-" => Ok(None),
                t => t.parse().map(Some).map_err(|_| s.as_str()),
            },
        }
    }
}

/// Complete input of a timetabling problem.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemDefinition {
    /// Lessons per day (K).
    pub lessons_per_day: usize,
    /// Class names, in registry order.
    pub classes: Vec<String>,
    /// Hour loads; teachers and subjects are registered in order of first
    /// appearance here.
    pub hours: Vec<HourEntry>,
    pub teachers: Vec<TeacherPreferences>,
    pub subjects: Vec<SubjectPreferences>,
    /// Pattern number to slot codes (one code per slot).
    pub day_patterns: BTreeMap<u32, String>,
    /// Class name to up to seven day references, Monday first.
    pub class_days: BTreeMap<String, Vec<Option<DayRef>>>,
}

impl ProblemDefinition {
    /// Builds the registry and slot template.
    ///
    /// # Errors
    /// `UnknownName` when an hour entry names an unlisted class,
    /// `InvalidConfig` for an unusable load.
    pub fn build(&self) -> Result<(Registry, SlotTemplate), TimetableError> {
        let registry = self.build_registry()?;
        let template = self.build_template(&registry)?;
        debug!(
            "loaded {} teachers, {} subjects, {} classes, {} lessons",
            registry.teachers().len(),
            registry.subjects().len(),
            registry.classes().len(),
            registry.lessons().len()
        );
        Ok((registry, template))
    }

    /// Builds and validates a [`TimetableProblem`] with the given weights.
    pub fn to_problem(&self, weights: PenaltyWeights) -> Result<TimetableProblem, TimetableError> {
        let (registry, template) = self.build()?;
        TimetableProblem::new(registry, template, weights)
    }

    fn build_registry(&self) -> Result<Registry, TimetableError> {
        let mut registry = Registry::new();
        let mut class_ids: HashMap<&str, ClassId> = HashMap::new();
        for name in &self.classes {
            let id = registry.add_class(SchoolClass::new(name.as_str()));
            class_ids.insert(name.as_str(), id);
        }

        let teacher_prefs: HashMap<&str, &TeacherPreferences> =
            self.teachers.iter().map(|p| (p.name.as_str(), p)).collect();
        let subject_prefs: HashMap<&str, &SubjectPreferences> =
            self.subjects.iter().map(|p| (p.name.as_str(), p)).collect();
        let mut teacher_ids: HashMap<&str, TeacherId> = HashMap::new();
        let mut subject_ids: HashMap<&str, SubjectId> = HashMap::new();

        for entry in &self.hours {
            let class_id = *class_ids.get(entry.class.as_str()).ok_or_else(|| {
                TimetableError::UnknownName {
                    kind: "class",
                    name: entry.class.clone(),
                }
            })?;
            let teacher_id = *teacher_ids
                .entry(entry.teacher.as_str())
                .or_insert_with(|| {
                    let teacher = Teacher::new(entry.teacher.as_str());
                    let teacher = match teacher_prefs.get(entry.teacher.as_str()) {
                        Some(prefs) => prefs.apply(teacher),
                        None => teacher,
                    };
                    registry.add_teacher(teacher)
                });
            let subject_id = *subject_ids
                .entry(entry.subject.as_str())
                .or_insert_with(|| {
                    let subject = Subject::new(entry.subject.as_str());
                    let subject = match subject_prefs.get(entry.subject.as_str()) {
                        Some(prefs) => prefs.apply(subject),
                        None => subject,
                    };
                    registry.add_subject(subject)
                });

            let (regular, blinking) = entry.lesson_counts()?;
            for _ in 0..regular {
                registry.add_lesson(Lesson::new(class_id, subject_id, teacher_id));
            }
            if blinking {
                registry.add_lesson(Lesson::new(class_id, subject_id, teacher_id).with_blinking(true));
            }
        }

        for prefs in &self.teachers {
            if !teacher_ids.contains_key(prefs.name.as_str()) {
                warn!("preferences for teacher '{}' ignored: no hours", prefs.name);
            }
        }
        for prefs in &self.subjects {
            if !subject_ids.contains_key(prefs.name.as_str()) {
                warn!("preferences for subject '{}' ignored: no hours", prefs.name);
            }
        }
        Ok(registry)
    }

    fn build_template(&self, registry: &Registry) -> Result<SlotTemplate, TimetableError> {
        let k = self.lessons_per_day;
        let patterns: BTreeMap<u32, Vec<SlotType>> = self
            .day_patterns
            .iter()
            .map(|(n, codes)| (*n, SlotType::parse_day(codes, k)))
            .collect();

        let mut template = SlotTemplate::new(k);
        for (class_name, days) in &self.class_days {
            let Some(class) = registry.class_by_name(class_name) else {
                warn!("day patterns for unknown class '{class_name}' ignored");
                continue;
            };
            let mut rows = Vec::with_capacity(DAYS_PER_WEEK);
            for day in 0..DAYS_PER_WEEK {
                let reference = days.get(day).and_then(Option::as_ref);
                let row = match reference.map(DayRef::pattern) {
                    None | Some(Ok(None)) => None,
                    Some(Ok(Some(n))) => {
                        let row = patterns.get(&n).cloned();
                        if row.is_none() {
                            warn!(
                                "unknown day pattern {n} for class '{class_name}' on day {}; day left empty",
                                day + 1
                            );
                        }
                        row
                    }
                    Some(Err(text)) => {
                        warn!(
                            "unknown day pattern '{text}' for class '{class_name}' on day {}; day left empty",
                            day + 1
                        );
                        None
                    }
                };
                rows.push(row.unwrap_or_else(|| vec![SlotType::Empty; k]));
            }
            template.insert_rows(class.id, rows)?;
        }
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn hour(class: &str, subject: &str, teacher: &str, load: f64) -> HourEntry {
        HourEntry {
            class: class.into(),
            subject: subject.into(),
            teacher: teacher.into(),
            load,
        }
    }

    fn sample_definition() -> ProblemDefinition {
        ProblemDefinition {
            lessons_per_day: 4,
            classes: vec!["5-A".into(), "5-B".into()],
            hours: vec![
                hour("5-A", "Math", "Bondar B.B.", 2.5),
                hour("5-B", "Math", "Bondar B.B.", 1.0),
                hour("5-B", "Art", "Kravets K.K.", 0.5),
            ],
            teachers: vec![TeacherPreferences {
                name: "Kravets K.K.".into(),
                can_offline: Some(Flag::Text("-".into())),
                wants_windows: Some(Flag::Text("Yes".into())),
                ..TeacherPreferences::default()
            }],
            subjects: vec![SubjectPreferences {
                name: "Math".into(),
                difficulty: Some(8),
                max_stack: Some(2),
                preferred_stack: Some(2),
                max_per_day: Some(2),
                ..SubjectPreferences::default()
            }],
            day_patterns: BTreeMap::from([(1, "OOUW".into()), (2, "uu".into())]),
            class_days: BTreeMap::from([
                (
                    "5-A".into(),
                    vec![
                        Some(DayRef::Number(1)),
                        Some(DayRef::Text("2".into())),
                        Some(DayRef::Text("-".into())),
                        None,
                        Some(DayRef::Number(9)),
                    ],
                ),
                ("5-B".into(), vec![Some(DayRef::Number(1)); 5]),
            ]),
        }
    }

    #[test]
    fn test_is_truthy_tokens() {
        for t in ["+", "1", "true", "TRUE", "yes", " Yes "] {
            assert!(is_truthy(t), "{t}");
        }
        for t in ["-", "0", "no", "", "none", "y"] {
            assert!(!is_truthy(t), "{t}");
        }
        assert!(Flag::Bool(true).is_set());
        assert!(Flag::Number(1).is_set());
        assert!(!Flag::Number(2).is_set());
    }

    #[test]
    fn test_lessons_from_hour_loads() {
        let (r, _) = sample_definition().build().unwrap();
        assert_eq!(r.lessons().len(), 5);
        let a = r.class_by_name("5-A").unwrap().id;
        let b = r.class_by_name("5-B").unwrap().id;
        assert!((r.class_load(a) - 2.5).abs() < 1e-10);
        assert!((r.class_load(b) - 1.5).abs() < 1e-10);
        assert_eq!(r.lessons().iter().filter(|l| l.is_blinking).count(), 2);
    }

    #[test]
    fn test_preferences_and_defaults() {
        let (r, _) = sample_definition().build().unwrap();
        let bondar = r.teacher_by_name("Bondar B.B.").unwrap();
        assert!(bondar.can_offline);
        assert_eq!(bondar.travel_time, 2);
        assert_eq!(bondar.max_online_from_school, 2);

        let kravets = r.teacher_by_name("Kravets K.K.").unwrap();
        assert!(!kravets.can_offline);
        assert!(kravets.wants_windows);
        assert_eq!(kravets.travel_time, 0);
        assert_eq!(kravets.max_online_from_school, 0);

        let math = r.subject_by_name("Math").unwrap();
        assert_eq!(math.difficulty, 8);
        assert_eq!((math.max_stack, math.preferred_stack, math.max_per_day), (2, 2, 2));
        let art = r.subject_by_name("Art").unwrap();
        assert_eq!(art.difficulty, 5);
        assert_eq!(art.max_per_day, 3);
    }

    #[test]
    fn test_day_patterns_to_template() {
        let (r, t) = sample_definition().build().unwrap();
        let a = r.class_by_name("5-A").unwrap().id;
        let grid = t.get(a).unwrap();
        assert_eq!(
            grid.day(0),
            &[SlotType::Online, SlotType::Online, SlotType::Offline, SlotType::Unwanted]
        );
        assert_eq!(
            grid.day(1),
            &[SlotType::Offline, SlotType::Offline, SlotType::Empty, SlotType::Empty]
        );
        // "-", missing, unknown pattern 9, and absent days are all empty.
        for d in 2..DAYS_PER_WEEK {
            assert!(grid.day(d).iter().all(|s| *s == SlotType::Empty), "day {d}");
        }
    }

    #[test]
    fn test_unknown_class_in_hours() {
        let mut def = sample_definition();
        def.hours.push(hour("9-Z", "Math", "Bondar B.B.", 1.0));
        assert!(matches!(
            def.build(),
            Err(TimetableError::UnknownName { kind: "class", .. })
        ));
    }

    #[test]
    fn test_negative_load_rejected() {
        let mut def = sample_definition();
        def.hours[0].load = -1.0;
        assert!(matches!(def.build(), Err(TimetableError::InvalidConfig(_))));
    }

    #[test]
    fn test_to_problem_validates() {
        let problem = sample_definition()
            .to_problem(PenaltyWeights::default())
            .unwrap();
        assert_eq!(problem.universe().len(), 5);

        let mut def = sample_definition();
        def.class_days.remove("5-B");
        assert!(matches!(
            def.to_problem(PenaltyWeights::default()),
            Err(TimetableError::Validation(_))
        ));
    }

    #[test]
    fn test_flag_from_json_values() {
        let flags: Vec<Flag> = serde_json::from_str(r#"[1, 1.0, true, "+", 0, "no"]"#).unwrap();
        assert_eq!(flags[1], Flag::Float(1.0));
        let set: Vec<bool> = flags.iter().map(Flag::is_set).collect();
        assert_eq!(set, vec![true, false, true, true, false, false]);
    }

    #[test]
    fn test_out_of_range_difficulty_reported() {
        let mut def = sample_definition();
        def.subjects[0].difficulty = Some(15);
        let (r, _) = def.build().unwrap();
        assert_eq!(r.subject_by_name("Math").unwrap().difficulty, 15);

        let err = def.to_problem(PenaltyWeights::default()).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::Validation(ref v)
                if v.iter().any(|e| e.kind == ValidationErrorKind::InvalidRange)
        ));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "lessons_per_day": 2,
            "classes": ["1-A"],
            "hours": [{"class": "1-A", "subject": "Reading", "teacher": "Savchuk S.S.", "load": 3}],
            "teachers": [{"name": "Savchuk S.S.", "can_offline": "+", "travel_time": 1}],
            "day_patterns": {"1": "OO"},
            "class_days": {"1-A": [1, "1", 0, null, "-"]}
        }"#;
        let def: ProblemDefinition = serde_json::from_str(json).unwrap();
        let (r, t) = def.build().unwrap();
        assert_eq!(r.lessons().len(), 3);
        let teacher = r.teacher_by_name("Savchuk S.S.").unwrap();
        assert!(teacher.can_offline);
        assert_eq!(teacher.travel_time, 1);
        let grid = t.get(r.class_by_name("1-A").unwrap().id).unwrap();
        assert_eq!(grid.day(1), &[SlotType::Online, SlotType::Online]);
        assert_eq!(grid.day(2), &[SlotType::Empty, SlotType::Empty]);
    }
}
