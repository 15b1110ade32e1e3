//! Two independently written concepts, merged twice: once from their
//! descriptions and once from the erasure types built from them.

use rubber_types::{merge, merge_erasures, model_get, spec, Model, TypeErasure};
use tracing_subscriber::EnvFilter;

#[spec]
pub trait Widget {
    fn render(&self) -> String;
}

#[spec]
pub trait Geometry {
    fn size(&self) -> usize;
}

/// Payload types opt in by providing `render`.
pub trait Render {
    fn render(&self) -> String;
}

pub trait Measure {
    fn size(&self) -> usize;
}

impl<T: Render> Widget for Model<T> {
    fn render(&self) -> String {
        model_get(self).render()
    }
}

impl<T: Measure> Geometry for Model<T> {
    fn size(&self) -> usize {
        model_get(self).size()
    }
}

#[merge]
pub trait GeomWidget: Geometry + Widget {}

merge_erasures!(
    /// Same concept as `GeomWidget`, built from the erasure types.
    pub MeasuredWidget = TypeErasure<dyn Geometry> + TypeErasure<dyn Widget>
);

struct UserWidget;

impl Render for UserWidget {
    fn render(&self) -> String {
        String::from("UserWidget::render")
    }
}

impl Measure for UserWidget {
    fn size(&self) -> usize {
        42
    }
}

fn render_widget(widget: &TypeErasure<dyn Widget>) {
    println!("{}", widget.render());
}

fn measure_geometry(geometry: &TypeErasure<dyn Geometry>) {
    println!("size: {}", geometry.size());
}

fn measure_and_render(widget: &TypeErasure<dyn GeomWidget>) {
    println!("size: {}", widget.size());
    println!("{}", widget.render());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    render_widget(&TypeErasure::new(UserWidget));
    println!();
    measure_geometry(&TypeErasure::new(UserWidget));
    println!();
    measure_and_render(&TypeErasure::new(UserWidget));
    println!();

    let measured = TypeErasure::<dyn MeasuredWidget>::new(UserWidget);
    println!("{} / {}", measured.render(), measured.size());

    println!("{}", TypeErasure::<dyn GeomWidget>::DESCRIPTION);
    println!("{}", TypeErasure::<dyn MeasuredWidget>::DESCRIPTION);
}
