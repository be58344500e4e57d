//! DOM adapter (browser only, `hydrate` feature).
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the thin layer between the view models and the page: it reads
//! input events, forwards typed events to the widgets, and writes their
//! views into fixed element IDs. Row identity travels in `data-entry-id`
//! attributes and text goes through `textContent`, so place names never
//! pass through HTML or inline handlers.
//!
//! Deferred itinerary instructions are scheduled with `gloo-timers` and
//! re-checked with `Planner::is_live` when they fire.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::api::{HttpApi, TravelApi};
use crate::gallery::{GALLERY_ERROR, Gallery, GalleryContent, GalleryView};
use crate::itinerary::{Entry, EntryId, Instruction, Planner, PlannerEvent, RenderOp, Slot, Tone};
use crate::map::{Geocoder, MapConfig, MapView, MapWidget, ProxyGeocoder};
use crate::search::{search_input, search_places};
use crate::weather::{WeatherConfig, WeatherView, WeatherWidget};

const HIDDEN: [&str; 2] = ["opacity-0", "scale-95"];
const SHOWN: [&str; 2] = ["opacity-100", "scale-100"];
const POOL_EXIT: [&str; 2] = ["opacity-0", "translate-x-full"];

const SPINNER_HTML: &str = r#"<div class="flex justify-center items-center p-8"><div class="animate-spin rounded-full h-8 w-8 border-b-2 border-white"></div></div>"#;

#[wasm_bindgen(js_namespace = wayfarerMap)]
extern "C" {
    /// Defined by `map-bridge.js`; no-op until the provider script has loaded.
    #[wasm_bindgen(js_name = render)]
    fn bridge_render(lat: f64, lng: f64, zoom: u8, marker: bool);
}

/// Browser entry point: mount every widget whose elements exist on the page.
///
/// # Errors
///
/// Returns the JS exception if a listener cannot be attached.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let doc = document()?;
    if doc.get_element_by_id("activity-pool").is_some() {
        ItineraryDom::mount(&doc)?;
    }
    if doc.get_element_by_id("imageModal").is_some() {
        GalleryDom::mount(&doc)?;
    }
    if doc.get_element_by_id("cityname").is_some() {
        mount_weather(doc.clone());
    }
    if doc.get_element_by_id("map").is_some() {
        mount_map(doc);
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn by_id(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn input_value(doc: &Document, id: &str) -> String {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn add_classes(el: &Element, classes: &[&str]) -> Result<(), JsValue> {
    let list = el.class_list();
    for class in classes {
        list.add_1(class)?;
    }
    Ok(())
}

fn remove_classes(el: &Element, classes: &[&str]) -> Result<(), JsValue> {
    let list = el.class_list();
    for class in classes {
        list.remove_1(class)?;
    }
    Ok(())
}

fn set_hidden(el: &Element, hidden: bool) -> Result<(), JsValue> {
    if hidden { el.class_list().add_1("hidden") } else { el.class_list().remove_1("hidden") }
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn is_enter(event: &Event) -> bool {
    event.dyn_ref::<KeyboardEvent>().is_some_and(|e| e.key() == "Enter")
}

fn log_js_error(context: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("{context}: {e:?}");
    }
}

// =============================================================================
// ITINERARY
// =============================================================================

struct ItineraryDom {
    planner: RefCell<Planner>,
    doc: Document,
    pool: Element,
    itinerary: Element,
}

impl ItineraryDom {
    fn mount(doc: &Document) -> Result<(), JsValue> {
        let this = Rc::new(Self {
            planner: RefCell::new(Planner::new()),
            doc: doc.clone(),
            pool: by_id(doc, "activity-pool")?,
            itinerary: by_id(doc, "itinerary-timeline")?,
        });

        let search = by_id(doc, "search")?;
        let on_search = Rc::clone(&this);
        listen(&search, "keypress", move |event| {
            if is_enter(&event) {
                on_search.search(input_value(&on_search.doc, "search"));
            }
        })?;

        for container in [&this.pool, &this.itinerary] {
            let on_click = Rc::clone(&this);
            listen(container, "click", move |event| on_click.click(&event))?;
        }
        Ok(())
    }

    fn search(self: &Rc<Self>, raw: String) {
        let Some(city) = search_input(&raw).map(str::to_owned) else {
            return;
        };
        let batch = self.planner.borrow_mut().begin_search();
        self.run(batch);

        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let result = search_places(&HttpApi, &city).await;
            let batch = this.planner.borrow_mut().finish_search(result);
            this.run(batch);
        });
    }

    fn click(self: &Rc<Self>, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(button)) = target.closest("[data-action]") else {
            return;
        };
        let Ok(Some(row)) = button.closest("[data-entry-id]") else {
            return;
        };
        let Some(id) = row
            .get_attribute("data-entry-id")
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(EntryId::from_u64)
        else {
            return;
        };
        let planner_event = match button.get_attribute("data-action").as_deref() {
            Some("add") => PlannerEvent::Add(id),
            Some("remove") => PlannerEvent::Remove(id),
            _ => return,
        };

        let result = self.planner.borrow_mut().apply(planner_event);
        match result {
            Ok(batch) => self.run(batch),
            // Double clicks during an exit animation land here.
            Err(e) => log::debug!("ignored click: {e}"),
        }
    }

    fn run(self: &Rc<Self>, batch: Vec<Instruction>) {
        for instruction in batch {
            if instruction.delay.is_zero() {
                log_js_error("render", self.apply(&instruction.op));
                continue;
            }
            let this = Rc::clone(self);
            let millis = u32::try_from(instruction.delay.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, move || {
                if this.planner.borrow().is_live(&instruction) {
                    log_js_error("deferred render", this.apply(&instruction.op));
                }
            })
            .forget();
        }
    }

    fn container(&self, slot: Slot) -> &Element {
        match slot {
            Slot::Pool => &self.pool,
            Slot::Itinerary => &self.itinerary,
        }
    }

    fn find(&self, slot: Slot, id: EntryId) -> Option<Element> {
        let selector = format!("[data-entry-id=\"{}\"]", id.as_u64());
        self.container(slot).query_selector(&selector).ok().flatten()
    }

    fn apply(&self, op: &RenderOp) -> Result<(), JsValue> {
        match op {
            RenderOp::ShowPoolLoading => self.pool.set_inner_html(SPINNER_HTML),
            RenderOp::ShowPoolMessage { tone, text } => {
                let wrapper = self.doc.create_element("div")?;
                wrapper.set_class_name(match tone {
                    Tone::Error => "text-center p-4 text-red-400",
                    Tone::Muted => "text-center p-4 text-neutral-400",
                });
                let p = self.doc.create_element("p")?;
                p.set_text_content(Some(text));
                wrapper.append_child(&p)?;
                self.pool.set_inner_html("");
                self.pool.append_child(&wrapper)?;
            }
            RenderOp::ClearPool => self.pool.set_inner_html(""),
            RenderOp::Append { slot, entry, hidden } => {
                let row = self.row(*slot, entry)?;
                if *hidden {
                    add_classes(&row, &HIDDEN)?;
                }
                self.container(*slot).append_child(&row)?;
            }
            RenderOp::Reveal { slot, id } => {
                if let Some(row) = self.find(*slot, *id) {
                    remove_classes(&row, &HIDDEN)?;
                    add_classes(&row, &SHOWN)?;
                }
            }
            RenderOp::BeginExit { slot, id } => {
                if let Some(row) = self.find(*slot, *id) {
                    let classes: &[&str] = match slot {
                        Slot::Pool => &POOL_EXIT,
                        Slot::Itinerary => &HIDDEN,
                    };
                    add_classes(&row, classes)?;
                }
            }
            RenderOp::Remove { slot, id } => {
                if let Some(row) = self.find(*slot, *id) {
                    row.remove();
                }
            }
        }
        Ok(())
    }

    fn row(&self, slot: Slot, entry: &Entry) -> Result<Element, JsValue> {
        let (row_class, name_class, address_class, button_class, action, label) = match slot {
            Slot::Pool => (
                "bg-neutral-800/50 p-4 rounded-xl border border-neutral-700/50 backdrop-blur-sm shadow-lg transform transition-all duration-300 hover:bg-neutral-700/50",
                "font-semibold text-lg text-neutral-100",
                "text-neutral-400 text-sm mt-1",
                "bg-blue-500/20 text-blue-300 hover:bg-blue-500/30 px-3 py-1.5 rounded-lg transition-colors text-sm font-medium",
                "add",
                "Add",
            ),
            Slot::Itinerary => (
                "bg-blue-900/40 p-4 rounded-xl border border-blue-500/30 text-white mt-3 backdrop-blur-sm shadow-lg transform transition-all duration-300",
                "font-semibold text-lg text-blue-100",
                "text-blue-200/80 text-sm mt-1",
                "text-red-400 hover:text-red-300 hover:bg-red-500/20 p-2 rounded-lg transition-colors",
                "remove",
                "Remove",
            ),
        };

        let row = self.doc.create_element("div")?;
        row.set_class_name(row_class);
        row.set_attribute("data-entry-id", &entry.id.as_u64().to_string())?;

        let layout = self.doc.create_element("div")?;
        layout.set_class_name("flex justify-between items-start gap-4");

        let text = self.doc.create_element("div")?;
        text.set_class_name("flex-1");
        let name = self.doc.create_element("h4")?;
        name.set_class_name(name_class);
        name.set_text_content(Some(&entry.place.name));
        let address = self.doc.create_element("p")?;
        address.set_class_name(address_class);
        address.set_text_content(Some(&entry.place.address));
        text.append_child(&name)?;
        text.append_child(&address)?;

        let button = self.doc.create_element("button")?;
        button.set_class_name(button_class);
        button.set_attribute("data-action", action)?;
        button.set_text_content(Some(label));

        layout.append_child(&text)?;
        layout.append_child(&button)?;
        row.append_child(&layout)?;
        Ok(row)
    }
}

// =============================================================================
// GALLERY
// =============================================================================

struct GalleryDom {
    gallery: RefCell<Gallery>,
    doc: Document,
}

impl GalleryDom {
    fn mount(doc: &Document) -> Result<(), JsValue> {
        let this = Rc::new(Self { gallery: RefCell::new(Gallery::new()), doc: doc.clone() });

        let on_open = Rc::clone(&this);
        listen(doc, "click", move |event| {
            let key = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-destination]").ok().flatten())
                .and_then(|el| el.get_attribute("data-destination"));
            if let Some(key) = key {
                on_open.open(&key);
            }
        })?;

        let modal = by_id(doc, "imageModal")?;
        let on_backdrop = Rc::clone(&this);
        listen(&modal, "click", move |event| {
            let on_backdrop_itself = event.target().is_some() && event.target() == event.current_target();
            on_backdrop.gallery.borrow_mut().handle_click(on_backdrop_itself);
            on_backdrop.render();
        })?;

        let on_key = Rc::clone(&this);
        listen(doc, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let changed = on_key.gallery.borrow_mut().handle_key(&key);
            if changed {
                on_key.render();
            }
        })?;
        Ok(())
    }

    fn open(self: &Rc<Self>, key: &str) {
        let dest = match self.gallery.borrow_mut().begin_open(key) {
            Ok(dest) => dest,
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };
        self.render();

        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let result = HttpApi.destination_images(dest.keywords).await;
            this.gallery.borrow_mut().finish_open(dest, result);
            this.render();
        });
    }

    fn render(&self) {
        let view = self.gallery.borrow().view().clone();
        log_js_error("gallery render", self.render_view(&view));
    }

    fn render_view(&self, view: &GalleryView) -> Result<(), JsValue> {
        set_hidden(&by_id(&self.doc, "imageModal")?, !view.visible)?;
        set_hidden(&by_id(&self.doc, "loadingSpinner")?, !view.spinner)?;
        set_text(&self.doc, "modalTitle", &view.title);

        let container = by_id(&self.doc, "modalImages")?;
        container.set_inner_html("");
        match &view.content {
            GalleryContent::Empty => {}
            GalleryContent::Images(tiles) => {
                for tile in tiles {
                    let frame = self.doc.create_element("div")?;
                    frame.set_class_name("aspect-w-1 aspect-h-1 overflow-hidden rounded-lg");
                    let img = self.doc.create_element("img")?;
                    img.set_attribute("src", &tile.src)?;
                    img.set_attribute("alt", &tile.alt)?;
                    img.set_attribute("loading", "lazy")?;
                    img.set_class_name("w-full h-full object-cover transform hover:scale-105 transition-transform duration-300");
                    frame.append_child(&img)?;
                    container.append_child(&frame)?;
                }
            }
            GalleryContent::Failed => {
                let p = self.doc.create_element("p")?;
                p.set_class_name("text-red-500");
                p.set_text_content(Some(GALLERY_ERROR));
                container.append_child(&p)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// WEATHER
// =============================================================================

fn render_weather(doc: &Document, view: &WeatherView) {
    for (id, text) in [
        ("cityname", &view.city_name),
        ("finaltemp", &view.temperature),
        ("d", &view.summary),
        ("longdescription", &view.description),
        ("feelslike", &view.feels_like),
        ("humidity", &view.humidity),
        ("mintemp", &view.min_temp),
        ("maxtemp", &view.max_temp),
        ("wind", &view.wind),
    ] {
        set_text(doc, id, text);
    }
}

fn mount_weather(doc: Document) {
    wasm_bindgen_futures::spawn_local(async move {
        let config = match WeatherConfig::from_relay(&HttpApi).await {
            Ok(config) => config,
            Err(e) => {
                log::error!("weather key relay failed: {e}");
                render_weather(&doc, &WeatherWidget::init_failed());
                return;
            }
        };
        let widget = Rc::new(RefCell::new(WeatherWidget::new(config)));

        if let Some(input) = doc.get_element_by_id("search-weather") {
            let (doc, widget) = (doc.clone(), Rc::clone(&widget));
            log_js_error(
                "weather listener",
                listen(&input, "keypress", move |event| {
                    if is_enter(&event) {
                        let (doc, widget) = (doc.clone(), Rc::clone(&widget));
                        wasm_bindgen_futures::spawn_local(async move {
                            update_weather(&doc, &widget).await;
                            if let Some(input) = doc
                                .get_element_by_id("search-weather")
                                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                            {
                                input.set_value("");
                            }
                        });
                    }
                }),
            );
        }

        update_weather(&doc, &widget).await;
    });
}

async fn update_weather(doc: &Document, widget: &Rc<RefCell<WeatherWidget>>) {
    let city = widget
        .borrow_mut()
        .begin_update(&input_value(doc, "search-weather"));
    render_weather(doc, widget.borrow().view());

    let config = widget.borrow().config().clone();
    let result = HttpApi.current_weather(&config, &city).await;
    widget.borrow_mut().finish_update(result);
    render_weather(doc, widget.borrow().view());
}

// =============================================================================
// MAP
// =============================================================================

fn render_map(doc: &Document, view: &MapView) {
    if let Some(el) = doc
        .get_element_by_id("error-message")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        el.set_text_content(view.error);
        let display = if view.error.is_some() { "block" } else { "none" };
        log_js_error("map error", el.style().set_property("display", display));
    }
    bridge_render(view.center.lat, view.center.lng, view.zoom, view.marker.is_some());
}

fn mount_map(doc: Document) {
    wasm_bindgen_futures::spawn_local(async move {
        let config = match MapConfig::from_relay(&HttpApi).await {
            Ok(config) => config,
            Err(e) => {
                log::error!("maps key relay failed: {e}");
                return;
            }
        };
        log_js_error("maps script", inject_script(&doc, &config.script_url()));

        let widget = Rc::new(RefCell::new(MapWidget::new(config)));
        let search = {
            let (doc, widget) = (doc.clone(), Rc::clone(&widget));
            Rc::new(move || {
                let (doc, widget) = (doc.clone(), Rc::clone(&widget));
                wasm_bindgen_futures::spawn_local(async move {
                    let raw = input_value(&doc, "mapsearch");
                    let address = widget.borrow_mut().begin_search(&raw).map(str::to_owned);
                    let Some(address) = address else {
                        render_map(&doc, widget.borrow().view());
                        return;
                    };
                    let result = ProxyGeocoder(&HttpApi).locate(&address).await;
                    widget.borrow_mut().finish_search(result);
                    render_map(&doc, widget.borrow().view());
                });
            })
        };

        if let Some(button) = doc.get_element_by_id("search-button") {
            let search = Rc::clone(&search);
            log_js_error("map button", listen(&button, "click", move |_| search()));
        }
        if let Some(input) = doc.get_element_by_id("mapsearch") {
            let search = Rc::clone(&search);
            log_js_error(
                "map input",
                listen(&input, "keypress", move |event| {
                    if is_enter(&event) {
                        search();
                    }
                }),
            );
        }
    });
}

fn inject_script(doc: &Document, src: &str) -> Result<(), JsValue> {
    let script = doc.create_element("script")?;
    script.set_attribute("src", src)?;
    script.set_attribute("async", "")?;
    script.set_attribute("defer", "")?;
    let head = doc.head().ok_or_else(|| JsValue::from_str("missing <head>"))?;
    head.append_child(&script)?;
    Ok(())
}
