//! File-driven audio spectrum: decode → buffer source → analyser → speakers.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::constants::SPECTRUM_FFT_SIZE;
use choreo_core::{Dispose, MotionConfig, Playback, PlaybackCommand, Simulation, Spectrum, Surface, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::canvas_fx::CanvasFx;
use crate::constants::{AUDIO_BUTTON_SELECTOR, AUDIO_FILE_SELECTOR};
use crate::dom::{self, Listener};

type AnalyserSlot = Rc<RefCell<Option<web::AnalyserNode>>>;

/// Spectrum fed from the analyser, once one exists.
pub struct LiveSpectrum {
    spectrum: Spectrum,
    analyser: AnalyserSlot,
}

impl Simulation for LiveSpectrum {
    fn resize(&mut self, viewport: Viewport) {
        self.spectrum.resize(viewport);
    }

    fn advance(&mut self, now_ms: f64) {
        match self.analyser.borrow().as_ref() {
            Some(a) => {
                let bins = a.frequency_bin_count() as usize;
                a.get_byte_frequency_data(self.spectrum.bins_mut(bins));
            }
            None => self.spectrum.clear_bins(),
        }
        self.spectrum.advance(now_ms);
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.spectrum.paint(surface);
    }

    fn paint_settled(&self, surface: &mut dyn Surface) {
        self.spectrum.paint_settled(surface);
    }
}

struct Graph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
}

fn create_graph() -> anyhow::Result<Graph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {e:?}"))?;
    let analyser = web::AnalyserNode::new(&ctx).map_err(|e| anyhow::anyhow!("AnalyserNode: {e:?}"))?;
    analyser.set_fft_size(SPECTRUM_FFT_SIZE);
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow::anyhow!("connect: {e:?}"))?;
    Ok(Graph { ctx, analyser })
}

struct AudioState {
    graph: Option<Graph>,
    analyser_slot: AnalyserSlot,
    buffer: Option<web::AudioBuffer>,
    source: Option<web::AudioBufferSourceNode>,
    on_ended: Option<Closure<dyn FnMut()>>,
    playback: Playback,
    button: web::Element,
    disposed: bool,
}

impl AudioState {
    /// The audio graph is created lazily, on the first user gesture.
    fn graph(&mut self) -> anyhow::Result<&Graph> {
        if self.graph.is_none() {
            let graph = create_graph()?;
            *self.analyser_slot.borrow_mut() = Some(graph.analyser.clone());
            log::info!(
                "[audio] graph ready ({} bins)",
                graph.analyser.frequency_bin_count()
            );
            self.graph = Some(graph);
        }
        self.graph
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("audio graph missing"))
    }

    fn stop_source(&mut self) {
        if let Some(src) = self.source.take() {
            src.set_onended(None);
            _ = src.stop();
            _ = src.disconnect();
        }
    }

    fn render_label(&self) {
        self.button.set_text_content(Some(self.playback.label()));
    }

    fn start_source(&mut self, me: &Rc<RefCell<AudioState>>) -> anyhow::Result<()> {
        self.stop_source();
        let buffer = self
            .buffer
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no decoded buffer"))?;
        let graph = self.graph()?;
        let src = graph
            .ctx
            .create_buffer_source()
            .map_err(|e| anyhow::anyhow!("createBufferSource: {e:?}"))?;
        src.set_buffer(Some(&buffer));
        src.connect_with_audio_node(&graph.analyser)
            .map_err(|e| anyhow::anyhow!("connect: {e:?}"))?;
        let weak = Rc::downgrade(me);
        let ended = Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut s = state.borrow_mut();
                s.source = None;
                s.playback.ended();
                s.render_label();
            }
        }) as Box<dyn FnMut()>);
        src.set_onended(Some(ended.as_ref().unchecked_ref()));
        self.on_ended = Some(ended);
        self.source = Some(src.clone());
        src.start().map_err(|e| anyhow::anyhow!("start: {e:?}"))
    }

    fn apply(&mut self, command: PlaybackCommand, me: &Rc<RefCell<AudioState>>) -> anyhow::Result<()> {
        match command {
            PlaybackCommand::Start => {
                if let Err(e) = self.start_source(me) {
                    self.playback.failed();
                    self.stop_source();
                    self.render_label();
                    return Err(e);
                }
            }
            PlaybackCommand::Stop => self.stop_source(),
            PlaybackCommand::Nothing => {}
        }
        self.render_label();
        Ok(())
    }
}

async fn load_file(state: Rc<RefCell<AudioState>>, file: web::File) -> anyhow::Result<()> {
    let bytes = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| anyhow::anyhow!("read: {e:?}"))?
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let decoding = {
        let mut s = state.borrow_mut();
        // Disposed while the file was being read.
        if s.disposed {
            return Ok(());
        }
        s.graph()?
            .ctx
            .decode_audio_data(&bytes)
            .map_err(|e| anyhow::anyhow!("decodeAudioData: {e:?}"))?
    };
    let buffer = JsFuture::from(decoding)
        .await
        .map_err(|e| anyhow::anyhow!("decode rejected: {e:?}"))?
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let mut s = state.borrow_mut();
    if s.disposed {
        return Ok(());
    }
    log::info!("[audio] decoded {:.1}s", buffer.duration());
    s.buffer = Some(buffer);
    let command = s.playback.loaded();
    s.apply(command, &state)
}

pub struct AudioViz {
    fx: CanvasFx<LiveSpectrum>,
    state: Rc<RefCell<AudioState>>,
    listeners: Vec<Listener>,
    disposed: bool,
}

impl AudioViz {
    pub fn init(
        document: &web::Document,
        container: &web::Element,
        motion: &MotionConfig,
    ) -> anyhow::Result<Self> {
        let input = dom::query_in(container, AUDIO_FILE_SELECTOR)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
            .ok_or_else(|| anyhow::anyhow!("audio visualiser has no file input"))?;
        let button = dom::query_in(container, AUDIO_BUTTON_SELECTOR)
            .ok_or_else(|| anyhow::anyhow!("audio visualiser has no toggle button"))?;

        let analyser_slot: AnalyserSlot = Rc::new(RefCell::new(None));
        let slot = analyser_slot.clone();
        let fx = CanvasFx::mount(document, container, motion, move |viewport| LiveSpectrum {
            spectrum: Spectrum::new(viewport),
            analyser: slot,
        })?;
        let state = Rc::new(RefCell::new(AudioState {
            graph: None,
            analyser_slot,
            buffer: None,
            source: None,
            on_ended: None,
            playback: Playback::default(),
            button: button.clone(),
            disposed: false,
        }));
        state.borrow().render_label();

        let mut listeners = Vec::new();
        let on_change = state.clone();
        let file_input = input.clone();
        listeners.push(Listener::new(&input, "change", move |_| {
            let Some(file) = file_input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let state = on_change.clone();
            spawn_local(async move {
                // The previous buffer (if any) stays loaded on failure.
                if let Err(e) = load_file(state, file).await {
                    log::warn!("[audio] {e:?}");
                }
            });
        })?);
        let on_click = state.clone();
        listeners.push(Listener::new(&button, "click", move |_| {
            let mut s = on_click.borrow_mut();
            match s.graph() {
                Ok(graph) => {
                    if graph.ctx.state() == web::AudioContextState::Suspended {
                        _ = graph.ctx.resume();
                    }
                }
                Err(e) => {
                    log::warn!("[audio] {e:?}");
                    return;
                }
            }
            let command = s.playback.toggle();
            if let Err(e) = s.apply(command, &on_click) {
                log::warn!("[audio] {e:?}");
            }
        })?);
        log::info!("[audio] mounted");
        Ok(Self {
            fx,
            state,
            listeners,
            disposed: false,
        })
    }
}

impl Dispose for AudioViz {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.fx.dispose();
        self.listeners.clear();
        let mut s = self.state.borrow_mut();
        s.stop_source();
        s.on_ended = None;
        if let Some(graph) = s.graph.take() {
            _ = graph.ctx.close();
        }
        *s.analyser_slot.borrow_mut() = None;
        s.disposed = true;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
