//! Browser binding using `web-sys`.
//!
//! - `BrowserPage` reads the live document (path, XPath price node, anchor)
//! - `BrowserChartHost` injects the container and drives Chart.js
//! - `start()` waits for `load`, then feeds `MutationObserver` callbacks to the
//!   session scheduler
//!
//! All session state lives in `thread_local!` statics (WASM is single-threaded).

use std::cell::RefCell;
use std::rc::Rc;

use async_lock::OnceCell;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, HtmlScriptElement, MutationObserver,
    MutationObserverInit, Window,
};

use crate::client::TrackerClient;
use crate::domain::listing::PageView;
use crate::domain::price_history::chart::Y_TICK_SUFFIX;
use crate::domain::price_history::ChartConfig;
use crate::error::RenderError;
use crate::network::CHART_LIBRARY_URL;
use crate::render::{ChartHost, SeriesRenderer};
use crate::scheduler::{MutationBatch, Scheduler};
use crate::tracker::run_cycle;

/// Structural position of the displayed price.
pub const PRICE_XPATH: &str =
    "/html/body/div[1]/div[1]/div/article/div[1]/div[1]/div[1]/div[2]/span[2]/span/span/span";

/// The chart container is inserted right after this region.
pub const ANCHOR_SELECTOR: &str = ".info-block";

pub const CHART_CANVAS_ID: &str = "price-history-chart";

thread_local! {
    static SCHEDULER: RefCell<Option<Scheduler>> = RefCell::new(None);
    static OBSERVER: RefCell<Option<MutationObserver>> = RefCell::new(None);
}

// ─── Page ────────────────────────────────────────────────────────────────────

pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl PageView for BrowserPage {
    fn location_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn price_text(&self) -> Option<String> {
        let result = self.document.evaluate(PRICE_XPATH, &self.document).ok()?;
        result.iterate_next().ok().flatten()?.text_content()
    }

    fn has_anchor(&self) -> bool {
        matches!(self.document.query_selector(ANCHOR_SELECTOR), Ok(Some(_)))
    }
}

// ─── Chart host ──────────────────────────────────────────────────────────────

pub struct BrowserChartHost {
    document: Document,
    wrapper: RefCell<Option<HtmlElement>>,
    canvas: RefCell<Option<HtmlCanvasElement>>,
    library: OnceCell<()>,
}

impl BrowserChartHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            wrapper: RefCell::new(None),
            canvas: RefCell::new(None),
            library: OnceCell::new(),
        }
    }

    fn html_element(&self, tag: &str) -> Result<HtmlElement, RenderError> {
        self.document
            .create_element(tag)
            .map_err(dom_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| RenderError::Dom(format!("<{}> is not an HtmlElement", tag)))
    }

    fn build_container(&self) -> Result<(HtmlElement, HtmlElement, HtmlCanvasElement), RenderError> {
        let container = self.html_element("div")?;
        container.set_class_name("characteristics-container");

        let title = self.html_element("h2")?;
        title.set_class_name("characteristics-main-title");
        title.set_text_content(Some("Price History"));
        container.append_child(&title).map_err(dom_error)?;

        let wrapper = self.html_element("div")?;
        set_styles(
            &wrapper,
            &[
                ("margin-top", "10px"),
                ("background", "#ffffff"),
                ("border", "none"),
                ("border-radius", "8px"),
                ("padding", "10px"),
                ("width", "100%"),
                ("box-sizing", "border-box"),
            ],
        )?;

        let canvas = self
            .document
            .create_element("canvas")
            .map_err(dom_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::Dom("<canvas> is not an HtmlCanvasElement".into()))?;
        canvas.set_id(CHART_CANVAS_ID);
        set_styles(&canvas, &[("width", "100%"), ("height", "180px")])?;

        wrapper.append_child(&canvas).map_err(dom_error)?;
        container.append_child(&wrapper).map_err(dom_error)?;
        Ok((container, wrapper, canvas))
    }

    async fn inject_library(&self) -> Result<(), RenderError> {
        let script = self
            .document
            .create_element("script")
            .map_err(dom_error)?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| RenderError::Dom("<script> is not an HtmlScriptElement".into()))?;
        script.set_src(CHART_LIBRARY_URL);

        let loaded = Promise::new(&mut |resolve, reject| {
            script.set_onload(Some(&resolve));
            script.set_onerror(Some(&reject));
        });

        let body = self
            .document
            .body()
            .ok_or_else(|| RenderError::Dom("document has no body".into()))?;
        body.append_child(&script).map_err(dom_error)?;

        JsFuture::from(loaded)
            .await
            .map(|_| ())
            .map_err(|e| RenderError::LibraryLoad(extract_js_error(&e)))
    }
}

impl ChartHost for BrowserChartHost {
    fn mount(&self) -> Result<(), RenderError> {
        let anchor = self
            .document
            .query_selector(ANCHOR_SELECTOR)
            .map_err(dom_error)?
            .ok_or(RenderError::AnchorMissing)?;
        let parent = anchor.parent_node().ok_or(RenderError::AnchorMissing)?;

        let (container, wrapper, canvas) = self.build_container()?;
        parent
            .insert_before(&container, anchor.next_sibling().as_ref())
            .map_err(dom_error)?;

        *self.wrapper.borrow_mut() = Some(wrapper);
        *self.canvas.borrow_mut() = Some(canvas);
        Ok(())
    }

    async fn load_library(&self) -> Result<(), RenderError> {
        self.library
            .get_or_try_init(|| self.inject_library())
            .await
            .map(|_| ())
    }

    fn draw(&self, config: &ChartConfig) -> Result<(), RenderError> {
        let canvas = self
            .canvas
            .borrow()
            .clone()
            .ok_or_else(|| RenderError::Draw("chart container not mounted".into()))?;

        let json = serde_json::to_string(config).map_err(|e| RenderError::Draw(e.to_string()))?;
        let js_config = js_sys::JSON::parse(&json).map_err(draw_error)?;

        let y_ticks = ["options", "scales", "y", "ticks"]
            .iter()
            .try_fold(js_config.clone(), |obj, key| Reflect::get(&obj, &JsValue::from_str(key)))
            .map_err(draw_error)?;
        let format_tick = Function::new_with_args(
            "val",
            &format!("return val.toLocaleString() + '{}';", Y_TICK_SUFFIX),
        );
        Reflect::set(&y_ticks, &JsValue::from_str("callback"), &format_tick).map_err(draw_error)?;

        let chart: Function = Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .map_err(draw_error)?
            .dyn_into()
            .map_err(|_| RenderError::Draw("Chart is not a constructor".into()))?;
        Reflect::construct(&chart, &Array::of2(&canvas, &js_config)).map_err(draw_error)?;
        Ok(())
    }

    fn show_notice(&self, message: &str) {
        let Some(wrapper) = self.wrapper.borrow().clone() else {
            tracing::warn!("Notice before mount: {}", message);
            return;
        };
        match self.html_element("div") {
            Ok(note) => {
                note.set_text_content(Some(message));
                if let Err(e) = wrapper.append_child(&note) {
                    tracing::error!("Failed to append notice: {}", extract_js_error(&e));
                }
            }
            Err(e) => tracing::error!("Failed to create notice: {}", e),
        }
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Install the tracker on the current page.
///
/// Starts watching on window `load` (or immediately if the document has
/// already finished loading).
#[wasm_bindgen(js_name = startPriceTracker)]
pub fn start() -> Result<(), JsValue> {
    install_console_logging();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let client = TrackerClient::builder()
        .build()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    SCHEDULER.with(|s| *s.borrow_mut() = Some(Scheduler::new(client.listing_pattern().clone())));

    let session = Rc::new(Session {
        client,
        page: BrowserPage::new(window.clone(), document.clone()),
        host: BrowserChartHost::new(document.clone()),
    });

    if document.ready_state() == "complete" {
        return session.watch();
    }

    let onload = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = session.clone().watch() {
            tracing::error!("Failed to start mutation observer: {}", extract_js_error(&e));
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();
    Ok(())
}

struct Session {
    client: TrackerClient,
    page: BrowserPage,
    host: BrowserChartHost,
}

impl Session {
    fn watch(self: Rc<Self>) -> Result<(), JsValue> {
        SCHEDULER.with(|s| {
            if let Some(scheduler) = s.borrow_mut().as_mut() {
                scheduler.start();
            }
        });

        let body = self
            .page
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let on_mutation = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                self.clone().on_batch(MutationBatch::new(records.length() as usize));
            },
        );
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        on_mutation.forget();

        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(&body, &init)?;

        OBSERVER.with(|o| *o.borrow_mut() = Some(observer));
        Ok(())
    }

    fn on_batch(self: Rc<Self>, batch: MutationBatch) {
        let admitted = SCHEDULER.with(|s| match s.try_borrow_mut() {
            Ok(mut scheduler) => scheduler
                .as_mut()
                .and_then(|scheduler| scheduler.on_mutation_batch(batch, &self.page)),
            Err(e) => {
                tracing::error!("Scheduler borrow failed: {}", e);
                None
            }
        });
        let Some(observation) = admitted else {
            return;
        };

        // Marker is set; mount before handing control back to the event loop.
        let mounted = self.host.mount();
        wasm_bindgen_futures::spawn_local(async move {
            let cycle =
                run_cycle(observation, mounted, &self.client, &self.host, SeriesRenderer).await;
            tracing::info!(report = ?cycle.report, render = ?cycle.render, "Sync cycle finished");
        });
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Route `tracing` events to the developer console. A subscriber installed by
/// the host page (or an earlier call) wins.
fn install_console_logging() {
    if tracing_wasm::try_set_as_global_default().is_err() {
        tracing::debug!("Global tracing subscriber already set");
    }
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), RenderError> {
    let style = element.style();
    for (name, value) in styles {
        style.set_property(name, value).map_err(dom_error)?;
    }
    Ok(())
}

fn dom_error(err: JsValue) -> RenderError {
    RenderError::Dom(extract_js_error(&err))
}

fn draw_error(err: JsValue) -> RenderError {
    RenderError::Draw(extract_js_error(&err))
}

fn extract_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        let name = error.name().as_string().unwrap_or_else(|| "Error".to_string());
        let message = error.message().as_string().unwrap_or_default();
        return if message.is_empty() {
            name
        } else {
            format!("{}: {}", name, message)
        };
    }

    if let Some(s) = err.as_string().filter(|s| !s.is_empty()) {
        return s;
    }

    if let Some(event) = err.dyn_ref::<web_sys::Event>() {
        return format!("{} event", event.type_());
    }

    if err.is_undefined() {
        return "undefined error".to_string();
    }

    "Unknown JavaScript error".to_string()
}
