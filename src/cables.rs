//! Cable network overlay: one SVG cable + pulse per card.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::{CableNetwork, Dispose, Rect};
use web_sys as web;

use crate::constants::{ACTIVE_CLASS, NETWORK_PULSE_RADIUS, NETWORK_STROKE_WIDTH};
use crate::dom::{self, Listener};

struct Cable {
    path: web::Element,
    pulse: web::Element,
}

struct NetworkState {
    container: web::Element,
    svg: web::Element,
    cards: Vec<web::HtmlElement>,
    cables: Vec<Cable>,
    network: CableNetwork,
}

impl NetworkState {
    fn measure(&self) -> (Rect, Vec<Option<Rect>>) {
        let container = dom::element_rect(&self.container);
        let cards = self
            .cards
            .iter()
            .map(|card| (!dom::is_hidden(card)).then(|| dom::element_rect(card)))
            .collect();
        (container, cards)
    }

    fn refresh(&mut self) {
        let (container, cards) = self.measure();
        if !self.network.refresh(container, &cards) {
            return;
        }
        dom::set_attr(
            &self.svg,
            "viewBox",
            &format!("0 0 {} {}", container.width, container.height),
        );
        self.render();
    }

    fn update(&mut self, focus: Option<usize>) {
        self.network.update(focus);
        self.render();
    }

    fn render(&self) {
        for (cable, link) in self.cables.iter().zip(self.network.links()) {
            dom::set_attr(&cable.path, "d", &link.d());
            dom::set_attr(&cable.path, "opacity", &link.stroke_opacity().to_string());
            if link.is_visible() {
                dom::set_attr(&cable.pulse, "cx", &link.pulse.x.to_string());
                dom::set_attr(&cable.pulse, "cy", &link.pulse.y.to_string());
            }
            dom::set_attr(&cable.pulse, "opacity", &link.pulse_opacity().to_string());
            dom::toggle_class(&cable.path, ACTIVE_CLASS, link.active);
            dom::toggle_class(&cable.pulse, ACTIVE_CLASS, link.active);
        }
    }
}

/// Handle returned by [`CableNetworkView::init`]. Re-measures on window
/// resize and scroll until disposed.
pub struct CableNetworkView {
    state: Rc<RefCell<NetworkState>>,
    listeners: Vec<Listener>,
    disposed: bool,
}

fn build_cable(document: &web::Document, svg: &web::Element) -> anyhow::Result<Cable> {
    let path = dom::create_svg(document, "path")?;
    dom::set_attr(&path, "fill", "none");
    dom::set_attr(&path, "stroke", "rgba(8, 9, 12, 0.9)");
    dom::set_attr(&path, "stroke-width", NETWORK_STROKE_WIDTH);
    dom::set_attr(&path, "stroke-linecap", "round");
    _ = path.class_list().add_1("network-cable");
    let pulse = dom::create_svg(document, "circle")?;
    dom::set_attr(&pulse, "r", NETWORK_PULSE_RADIUS);
    dom::set_attr(&pulse, "fill", "#f7f3ed");
    dom::set_attr(&pulse, "opacity", "0");
    _ = pulse.class_list().add_1("network-pulse");
    svg.append_child(&path).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    svg.append_child(&pulse).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    Ok(Cable { path, pulse })
}

impl CableNetworkView {
    pub fn init(
        document: &web::Document,
        container: &web::Element,
        cards: Vec<web::HtmlElement>,
    ) -> anyhow::Result<Self> {
        if cards.is_empty() {
            anyhow::bail!("cable network has no cards");
        }
        let svg = dom::create_svg(document, "svg")?;
        dom::set_attr(&svg, "width", "100%");
        dom::set_attr(&svg, "height", "100%");
        dom::set_attr(&svg, "viewBox", "0 0 100 100");
        dom::set_attr(&svg, "preserveAspectRatio", "none");
        container.set_inner_html("");
        container
            .append_child(&svg)
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        let cables = cards
            .iter()
            .map(|_| build_cable(document, &svg))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let state = Rc::new(RefCell::new(NetworkState {
            container: container.clone(),
            svg,
            network: CableNetwork::new(cards.len()),
            cards,
            cables,
        }));
        state.borrow_mut().refresh();

        let mut listeners = Vec::new();
        for event in ["resize", "scroll"] {
            let s = state.clone();
            listeners.push(Listener::on_window(event, move |_| s.borrow_mut().refresh())?);
        }
        log::info!("[cables] {} cards", state.borrow().cables.len());
        Ok(Self {
            state,
            listeners,
            disposed: false,
        })
    }

    pub fn refresh(&self) {
        self.state.borrow_mut().refresh();
    }

    pub fn update(&self, focus: Option<usize>) {
        self.state.borrow_mut().update(focus);
    }

    /// Card elements in cable order.
    pub fn cards(&self) -> Vec<web::HtmlElement> {
        self.state.borrow().cards.clone()
    }
}

impl Dispose for CableNetworkView {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

