use std::cell::RefCell;
use std::rc::Rc;

use rubber_types::{merge, merge_erasures, model_get, spec, Model, TypeErasure};

#[spec]
pub trait Widget {
    fn render(&self) -> String;
}

#[spec]
pub trait Geometry {
    fn size(&self) -> usize;
}

#[merge]
pub trait GeomWidget: Geometry + Widget {}

#[merge]
pub trait WidgetGeom: Widget + Geometry {}

#[merge]
pub trait OnlyWidget: Widget {}

merge_erasures!(
    pub MeasuredWidget = TypeErasure<dyn Geometry> + TypeErasure<dyn Widget>
);

/// Records which adapter ran, so dispatch can be checked per operation.
#[derive(Clone, Default)]
pub struct Probe {
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

impl Probe {
    pub fn render(&self) -> String {
        String::from("probe")
    }

    pub fn size(&self) -> usize {
        42
    }

    pub fn take_calls(&self) -> Vec<&'static str> {
        self.calls.borrow_mut().drain(..).collect()
    }
}

impl Widget for Model<Probe> {
    fn render(&self) -> String {
        let probe = model_get(self);
        probe.calls.borrow_mut().push("widget");
        probe.render()
    }
}

impl Geometry for Model<Probe> {
    fn size(&self) -> usize {
        let probe = model_get(self);
        probe.calls.borrow_mut().push("geometry");
        probe.size()
    }
}

// Diamond: `B` is reached through both `AB` and `BC`.

#[spec]
pub trait A {
    fn alpha(&self) -> &'static str;
}

#[spec]
pub trait B {
    fn beta(&self) -> &'static str;
}

#[spec]
pub trait C {
    fn gamma(&self) -> &'static str;
}

#[merge]
pub trait AB: A + B {}

#[merge]
pub trait BC: B + C {}

#[merge]
pub trait ABC: AB + BC {}

// The same three leaves, grouped both ways.

#[merge]
pub trait ABc: A + BC {}

#[merge]
pub trait AbC: AB + C {}

merge_erasures!(
    pub ErasedABC = TypeErasure<dyn AB> + TypeErasure<dyn BC>
);

pub struct Letters;

impl A for Model<Letters> {
    fn alpha(&self) -> &'static str {
        "a"
    }
}

impl B for Model<Letters> {
    fn beta(&self) -> &'static str {
        "b"
    }
}

impl C for Model<Letters> {
    fn gamma(&self) -> &'static str {
        "c"
    }
}
