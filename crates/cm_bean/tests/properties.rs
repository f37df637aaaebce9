use core::any::TypeId;

use cm_bean::property::{WriteConvention, resolve_read, resolve_write};
use cm_bean::{Bean, BeanError, TypedBean, bean_methods, util};

// -----------------------------------------------------------------------------
// Five properties, standard and fluent accessors

#[derive(Bean, Default, Clone, PartialEq, Debug)]
#[bean(default, clone, partial_eq, debug)]
struct Event {
    code: u32,
}

#[bean_methods]
impl Event {
    fn get_code(&self) -> u32 {
        self.code
    }

    fn set_code(&mut self, code: u32) {
        self.code = code;
    }
}

#[derive(Bean, Default)]
#[bean(default)]
struct Sample {
    string: String,
    primitive_int: i32,
    object_integer: Option<i32>,
    event: Event,
    doubles: Vec<f64>,
    pub exposed: bool,
    #[bean(skip)]
    scratch: u8,
    unreachable: u8,
}

#[bean_methods]
impl Sample {
    fn get_string(&self) -> &str {
        &self.string
    }

    fn set_string(&mut self, string: String) -> &mut Self {
        self.string = string;
        self
    }

    fn get_primitive_int(&self) -> i32 {
        self.primitive_int
    }

    fn set_primitive_int(&mut self, value: i32) {
        self.primitive_int = value;
    }

    fn object_integer(&self) -> Option<i32> {
        self.object_integer
    }

    fn set_object_integer(&mut self, value: Option<i32>) {
        self.object_integer = value;
    }

    fn get_event(&self) -> &Event {
        &self.event
    }

    fn event(&mut self, event: Event) -> &mut Self {
        self.event = event;
        self
    }

    fn get_doubles(&self) -> &Vec<f64> {
        &self.doubles
    }

    fn doubles(&mut self, doubles: Vec<f64>) {
        self.doubles = doubles;
    }

    fn get_exposed(&self) -> bool {
        self.exposed
    }

    fn get_scratch(&self) -> u8 {
        self.scratch
    }

    fn touch(&mut self) {
        self.unreachable = self.unreachable.wrapping_add(1);
    }
}

#[test]
fn enumerates_exactly_the_accessible_private_fields() {
    let names: Vec<_> = Sample::type_bean_info()
        .properties()
        .iter()
        .map(|property| property.name())
        .collect();

    assert_eq!(
        names,
        ["string", "primitive_int", "object_integer", "event", "doubles"]
    );
}

#[test]
fn properties_report_their_accessors() {
    let info = Sample::type_bean_info();

    let string = info.property("string").unwrap();
    assert_eq!(string.read_method().map(|m| m.name()), Some("get_string"));
    assert_eq!(string.write_method().map(|m| m.name()), Some("set_string"));
    assert!(string.value_type().is_some_and(|ty| ty.is::<String>()));

    let event = info.property("event").unwrap();
    assert_eq!(event.write_method().map(|m| m.name()), Some("event"));

    let object_integer = info.property("object_integer").unwrap();
    assert_eq!(object_integer.read_method().map(|m| m.name()), Some("object_integer"));
}

#[test]
fn non_property_methods_are_registered() {
    let methods = Sample::type_bean_info().methods();
    let touch = methods.named("touch").next().unwrap();
    assert!(!touch.is_reader() && !touch.is_writer());
    assert!(touch.read(&Sample::default()).is_err());
}

#[test]
fn get_and_set_through_descriptors() {
    let mut sample = Sample::default();

    assert!(util::set_property(&mut sample, "primitive_int", Box::new(7_i32)).unwrap());
    assert!(util::set_property(&mut sample, "string", Box::new(String::from("s"))).unwrap());
    assert!(!util::set_property(&mut sample, "missing", Box::new(1_i32)).unwrap());

    assert_eq!(sample.primitive_int, 7);
    assert_eq!(util::read_property::<String>(&sample, "string").unwrap(), "s");

    let value = util::get_property(&sample, "event").unwrap().unwrap();
    assert!(value.is_borrowed());
    assert_eq!(value.downcast_ref::<Event>(), Some(&Event::default()));
}

#[test]
fn wrong_argument_type_is_an_invoke_error() {
    let mut sample = Sample::default();
    let err = util::set_property(&mut sample, "primitive_int", Box::new(7_u64)).unwrap_err();
    assert!(matches!(err, BeanError::Invoke { method: "set_primitive_int", .. }));
}

#[test]
fn typed_access_errors() {
    let mut sample = Sample::default();

    let missing = util::read_property::<i32>(&sample, "nope").unwrap_err();
    assert!(matches!(missing, BeanError::NoSuchProperty { .. }));

    let mismatch = util::read_property::<u64>(&sample, "primitive_int").unwrap_err();
    assert!(matches!(mismatch, BeanError::TypeMismatch { .. }));

    let read_only = util::write_property(&mut sample, "exposed", Box::new(true)).unwrap_err();
    assert!(matches!(read_only, BeanError::NotWritable { .. }));

    let not_bean = util::get_property(&5_i32, "x").unwrap_err();
    assert!(matches!(not_bean, BeanError::NotABean { .. }));
}

#[test]
fn boxed_and_optional_beans_are_looked_through() {
    let boxed: Box<Sample> = Box::default();
    assert_eq!(util::read_property::<i32>(&boxed, "primitive_int").unwrap(), 0);

    let mut absent: Option<Sample> = None;
    assert!(util::get_property(&absent, "string").unwrap().is_none());
    assert!(!util::set_property(&mut absent, "string", Box::new(String::new())).unwrap());
}

// -----------------------------------------------------------------------------
// Write resolution precedence

#[derive(Bean, Default)]
#[bean(default)]
struct Setters {
    plain: i32,
    fluent: i32,
    builder: i32,
    fluent_builder: i32,
    typed: i32,
}

#[bean_methods]
impl Setters {
    fn set_plain(&mut self, value: i32) {
        self.plain = value;
    }

    fn plain(&mut self, value: i32) -> &mut Self {
        self.plain = -value;
        self
    }

    fn set_fluent(&mut self, value: i32) -> &mut Self {
        self.fluent = value;
        self
    }

    fn fluent(&mut self, value: i32) {
        self.fluent = -value;
    }

    fn builder(&mut self, value: i32) {
        self.builder = value;
    }

    fn fluent_builder(&mut self, value: i32) -> &mut Self {
        self.fluent_builder = value;
        self
    }

    fn set_typed(&mut self, value: String) {
        self.typed = value.len() as i32;
    }
}

#[test]
fn write_precedence() {
    let methods = Setters::type_bean_info().methods();
    let int = Some(TypeId::of::<i32>());

    let resolved = |name: &str| resolve_write(methods, name, int).map(|m| m.name());
    assert_eq!(resolved("plain"), Some("set_plain"));
    assert_eq!(resolved("fluent"), Some("set_fluent"));
    assert_eq!(resolved("builder"), Some("builder"));
    assert_eq!(resolved("fluent_builder"), Some("fluent_builder"));

    assert_eq!(resolved("typed"), None);
    let untyped = resolve_write(methods, "typed", None).map(|m| m.name());
    assert_eq!(untyped, Some("set_typed"));

    assert!(resolve_read(methods, "plain").is_none());
    assert!(WriteConvention::FluentBuilder.is_fluent());
}

#[test]
fn write_only_properties_are_enumerated() {
    let info = Setters::type_bean_info();
    let names: Vec<_> = info.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["plain", "fluent", "builder", "fluent_builder"]);

    let mut setters = Setters::default();
    util::set_property(&mut setters, "plain", Box::new(3_i32)).unwrap();
    util::set_property(&mut setters, "fluent", Box::new(4_i32)).unwrap();
    assert_eq!((setters.plain, setters.fluent), (3, 4));
}

// -----------------------------------------------------------------------------
// Generic beans and trait impls

#[derive(Bean, Default)]
#[bean(default)]
struct Wrapper<T> {
    inner: T,
}

#[bean_methods]
impl Wrapper<u16> {
    fn get_inner(&self) -> u16 {
        self.inner
    }
}

trait Labelled {
    fn label(&self) -> String;
}

#[bean_methods]
impl Labelled for Wrapper<u16> {
    fn label(&self) -> String {
        format!("#{}", self.inner)
    }
}

#[test]
fn generic_instantiations_have_their_own_info() {
    let a = Wrapper::<u16>::type_bean_info();
    let b = Wrapper::<String>::type_bean_info();
    assert!(!core::ptr::eq(a, b));
    assert_eq!(a.properties().len(), 1);
    assert!(b.properties().is_empty());

    let wrapper = Wrapper { inner: 5_u16 };
    let label = util::get_property(&wrapper, "label").unwrap().unwrap();
    assert_eq!(label.downcast_ref::<String>().map(String::as_str), Some("#5"));
    assert!(core::ptr::eq(wrapper.bean_info(), a));
}

// -----------------------------------------------------------------------------
// Types without a constructor

#[derive(Bean)]
struct NoDefault {
    value: i32,
}

#[bean_methods]
impl NoDefault {
    fn get_value(&self) -> i32 {
        self.value
    }
}

#[test]
fn no_constructor_means_no_properties() {
    let info = NoDefault::type_bean_info();
    assert!(info.properties().is_empty());
    assert!(matches!(info.instantiate(), Err(BeanError::Instantiate { .. })));

    // Ad-hoc descriptors still resolve.
    let item = NoDefault { value: 9 };
    assert_eq!(util::read_property::<i32>(&item, "value").unwrap(), 9);
    assert!(util::clone_value(&item).is_err());
}
