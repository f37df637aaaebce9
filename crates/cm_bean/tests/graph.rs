use std::sync::Arc;

use cm_bean::visit::{self, VisitCallback, Visitor};
use cm_bean::{Bean, PropertyDescriptor, Value, bean_methods, util};
use parking_lot::RwLock;

// -----------------------------------------------------------------------------
// Cyclic graphs

#[derive(Bean, Default)]
#[bean(default)]
struct Node {
    name: String,
    next: Option<Arc<RwLock<Node>>>,
}

#[bean_methods]
impl Node {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn get_next(&self) -> &Option<Arc<RwLock<Node>>> {
        &self.next
    }

    fn set_next(&mut self, next: Option<Arc<RwLock<Node>>>) {
        self.next = next;
    }
}

fn node(name: &str) -> Arc<RwLock<Node>> {
    Arc::new(RwLock::new(Node {
        name: String::from(name),
        next: None,
    }))
}

#[test]
fn cycles_are_visited_once() {
    let a = node("a");
    let b = node("b");
    a.write().next = Some(b.clone());
    b.write().next = Some(a.clone());

    let mut names = Vec::new();
    let completed = visit::visit_typed::<Node>(&a, |node| {
        names.push(node.name.clone());
        true
    });
    assert!(completed);
    assert_eq!(names, ["a", "b"]);

    let mut strings = 0;
    visit::visit_typed::<String>(&a, |_| {
        strings += 1;
        true
    });
    assert_eq!(strings, 2);

    b.write().next = None;
}

#[test]
fn self_reference_is_visited_once() {
    let a = node("a");
    a.write().next = Some(a.clone());

    let mut count = 0;
    visit::visit_typed::<Node>(&a, |_| {
        count += 1;
        true
    });
    assert_eq!(count, 1);

    a.write().next = None;
}

#[test]
fn false_stops_the_traversal() {
    let a = node("a");
    let b = node("b");
    a.write().next = Some(b.clone());

    let mut seen = 0;
    let completed = visit::visit_typed::<Node>(&a, |_| {
        seen += 1;
        false
    });
    assert!(!completed);
    assert_eq!(seen, 1);
}

#[test]
fn properties_through_locks() {
    let a = node("a");
    a.write().next = Some(node("b"));

    assert_eq!(util::read_property::<String>(&a, "name").unwrap(), "a");

    let mut shared = a.clone();
    util::write_property(&mut shared, "name", Box::new(String::from("z"))).unwrap();
    assert_eq!(a.read().name, "z");
}

// -----------------------------------------------------------------------------
// Transient properties and callbacks

#[derive(Bean, Default)]
#[bean(default)]
struct Session {
    user: String,
    #[bean(transient)]
    token: String,
    attempts: u32,
}

#[bean_methods]
impl Session {
    fn get_user(&self) -> &str {
        &self.user
    }

    fn get_token(&self) -> &str {
        &self.token
    }

    #[transient]
    fn get_attempts(&self) -> u32 {
        self.attempts
    }
}

fn session() -> Session {
    Session {
        user: String::from("ann"),
        token: String::from("secret"),
        attempts: 2,
    }
}

#[test]
fn transient_properties_are_skipped() {
    let mut names = Vec::new();
    visit::visit_properties(&session(), |_, property, _| {
        names.push(String::from(property.name()));
        true
    });
    assert_eq!(names, ["user"]);

    let mut all = Vec::new();
    Visitor::new()
        .include_transient(true)
        .visit_properties(&session(), |_, property, _| {
            all.push(String::from(property.name()));
            true
        });
    assert_eq!(all, ["user", "token", "attempts"]);
}

#[derive(Default)]
struct Recorder {
    values: usize,
    properties: Vec<String>,
}

impl VisitCallback for Recorder {
    fn value(&mut self, _value: &dyn Value) -> bool {
        self.values += 1;
        true
    }

    fn property(&mut self, bean: &dyn Bean, property: &PropertyDescriptor, value: &dyn Value) -> bool {
        let name = format!("{}.{}={}", bean.bean_info().name(), property.name(), value.display());
        self.properties.push(name);
        true
    }
}

#[test]
fn callbacks_receive_values_and_properties() {
    let mut recorder = Recorder::default();
    assert!(visit::visit_with(&session(), &mut recorder, None));

    // The session itself and its user string.
    assert_eq!(recorder.values, 2);
    assert_eq!(recorder.properties, ["Session.user=ann"]);
}

// -----------------------------------------------------------------------------
// Copy, clone and diff

#[derive(Bean, Default, PartialEq, Debug)]
#[bean(default, partial_eq, debug)]
struct Profile {
    name: String,
    nickname: Option<String>,
    age: Option<u32>,
    scores: Vec<u32>,
}

#[bean_methods]
impl Profile {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn get_nickname(&self) -> &Option<String> {
        &self.nickname
    }

    fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
    }

    fn get_age(&self) -> Option<u32> {
        self.age
    }

    fn set_age(&mut self, age: Option<u32>) {
        self.age = age;
    }

    fn get_scores(&self) -> &Vec<u32> {
        &self.scores
    }

    fn set_scores(&mut self, scores: Vec<u32>) {
        self.scores = scores;
    }
}

fn profiles() -> (Profile, Profile) {
    let target = Profile {
        name: String::from("kept"),
        nickname: None,
        age: Some(3),
        scores: Vec::new(),
    };
    let source = Profile {
        name: String::from("source"),
        nickname: Some(String::from("nick")),
        age: Some(9),
        scores: vec![1, 2],
    };
    (target, source)
}

#[test]
fn copy_overwrites_everything() {
    let (mut target, source) = profiles();
    util::copy_properties(&mut target, &source).unwrap();
    assert_eq!(target, source);
}

#[test]
fn copy_over_nulls_only_fills_nulls() {
    let (mut target, source) = profiles();
    util::copy_properties_over_nulls(&mut target, &source).unwrap();

    assert_eq!(target.name, "kept");
    assert_eq!(target.nickname.as_deref(), Some("nick"));
    assert_eq!(target.age, Some(3));
    assert!(target.scores.is_empty());
}

#[derive(Bean, Default)]
#[bean(default)]
struct Summary {
    name: String,
    age: u32,
}

#[bean_methods]
impl Summary {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn set_age(&mut self, age: u32) {
        self.age = age;
    }
}

#[test]
fn copy_between_bean_types_matches_by_name() {
    let (_, source) = profiles();
    let mut summary = Summary::default();
    util::copy_properties(&mut summary, &source).unwrap();

    assert_eq!(summary.name, "source");
    // `Option<u32>` does not fit `u32`.
    assert_eq!(summary.age, 0);
}

#[test]
fn clone_is_equal_but_distinct() {
    let (_, source) = profiles();
    let copy = util::clone_bean(&source).unwrap();

    assert_eq!(copy, source);
    assert!(!core::ptr::eq(&copy, &source));
    assert_ne!(copy.scores.as_ptr(), source.scores.as_ptr());
}

#[test]
fn diff_lists_changed_properties() {
    let (target, source) = profiles();
    let diff = util::diff(&target, &source);
    let lines: Vec<_> = diff.lines().collect();

    assert_eq!(lines, [
        "< Profile.age = 3",
        "> Profile.age = 9",
        "< Profile.name = \"kept\"",
        "> Profile.name = \"source\"",
        "< Profile.nickname = null",
        "> Profile.nickname = \"nick\"",
        "< Profile.scores = []",
        "> Profile.scores = [1, 2]",
    ]);
    assert!(util::diff(&source, &util::clone_bean(&source).unwrap()).is_empty());
}

#[test]
fn flat_projections() {
    let (target, _) = profiles();

    let map = util::to_map(&target).unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map["age"].downcast_ref::<Option<u32>>(), Some(&Some(3)));

    let text = util::to_properties(&target).unwrap();
    let entries: Vec<_> = text.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(entries, [("age", "3"), ("name", "kept")]);
}

#[derive(Bean, Default)]
#[bean(default)]
struct Point {
    x: i32,
    y: i32,
}

#[bean_methods]
impl Point {
    fn get_x(&self) -> i32 {
        self.x
    }

    fn get_y(&self) -> i32 {
        self.y
    }
}

#[test]
fn debug_renders_readable_properties() {
    let point: &dyn Value = &Point { x: 1, y: -2 };
    assert_eq!(format!("{point:?}"), "Point { x: 1, y: -2 }");
}
