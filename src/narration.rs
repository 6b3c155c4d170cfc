//! Narration orchestration: service audio with a local speech fallback.
//!
//! The narration service receives the hotspot's title and description and
//! replies with a playable media URI. On any failure the raw description is
//! handed to the platform's speech synthesis instead. The pure
//! [`NarrationMachine`](crate::core::NarrationMachine) arbitrates which
//! request is current; everything here checks its ticket before touching
//! audible output, so superseded completions are inert.

use crate::constants::*;
use crate::core::{Hotspot, NarrationMachine, NarrationStatus, NarrationTicket};
use crate::dom;
use crate::listeners::ListenerBag;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Serialize)]
struct NarrationRequestBody<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Deserialize)]
struct NarrationReply {
    media: String,
}

/// Mediates the single in-flight narration for the active selection.
#[derive(Clone, Default)]
pub struct Narrator {
    machine: Rc<RefCell<NarrationMachine>>,
    audio: Rc<RefCell<Option<web::HtmlAudioElement>>>,
    utterance: Rc<RefCell<Option<web::SpeechSynthesisUtterance>>>,
    // ended/error listeners for the current playback only
    playback_listeners: Rc<RefCell<ListenerBag>>,
}

impl Narrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start narration for `hotspot`, superseding and silencing any prior
    /// request before the new one makes a sound.
    pub fn request(&self, hotspot: &Hotspot) {
        self.stop_outputs();
        let ticket = self.machine.borrow_mut().begin(&hotspot.id);
        set_busy(true);
        log::info!("[narration] request for '{}'", hotspot.id);

        let this = self.clone();
        let title = hotspot.title.clone();
        let description = hotspot.description.clone();
        spawn_local(async move {
            match fetch_narration(&title, &description).await {
                Ok(media) => {
                    if this.machine.borrow().is_current(ticket) {
                        this.play_media(&media, &description, ticket);
                    }
                }
                Err(e) => {
                    log::warn!("[narration] service failed: {:?}", e);
                    this.fallback_speak(&description, ticket);
                }
            }
        });
    }

    /// Stop any active playback or synthesis immediately and return to idle.
    pub fn cancel(&self) {
        self.stop_outputs();
        self.machine.borrow_mut().cancel();
        set_busy(false);
    }

    fn play_media(&self, media_uri: &str, description: &str, ticket: NarrationTicket) {
        let audio = match web::HtmlAudioElement::new_with_src(media_uri) {
            Ok(a) => a,
            Err(e) => {
                log::warn!("[narration] audio element failed: {:?}", e);
                self.fallback_speak(description, ticket);
                return;
            }
        };
        {
            let mut bag = self.playback_listeners.borrow_mut();
            let machine = self.machine.clone();
            bag.attach(&audio.clone().into(), "ended", move |_| {
                machine.borrow_mut().completed(ticket);
                set_busy(false);
            });
            // a bad media URI fires this AND rejects the play() promise; the
            // Pending gate in fallback_speak keeps the second trigger inert
            let this = self.clone();
            let text = description.to_owned();
            bag.attach(&audio.clone().into(), "error", move |_| {
                this.fallback_speak(&text, ticket);
            });
        }
        match audio.play() {
            Ok(promise) => {
                *self.audio.borrow_mut() = Some(audio);
                let this = self.clone();
                let text = description.to_owned();
                spawn_local(async move {
                    match JsFuture::from(promise).await {
                        // the promise resolves once playback has actually begun
                        Ok(_) => {
                            this.machine.borrow_mut().playback_started(ticket);
                        }
                        Err(_) => this.fallback_speak(&text, ticket),
                    }
                });
            }
            Err(e) => {
                log::warn!("[narration] play() rejected: {:?}", e);
                self.fallback_speak(description, ticket);
            }
        }
    }

    /// Speak `text` locally for a request whose service audio never started.
    ///
    /// Only a current, still-Pending request may fall back; once one trigger
    /// has engaged speech the request is Playing and later triggers for the
    /// same ticket bail out, so a failed playback narrates exactly once.
    /// (Stopping outputs here is not an option: this runs inside listeners
    /// owned by `playback_listeners`, and `detach_all` would drop a closure
    /// mid-execution.)
    fn fallback_speak(&self, text: &str, ticket: NarrationTicket) {
        {
            let machine = self.machine.borrow();
            if !machine.is_current(ticket) || machine.status() != NarrationStatus::Pending {
                return;
            }
        }
        log::warn!("[narration] falling back to local speech");
        let synth = match web::window().map(|w| w.speech_synthesis()) {
            Some(Ok(s)) => s,
            _ => {
                self.machine.borrow_mut().failed(ticket);
                set_busy(false);
                return;
            }
        };
        let utterance = match web::SpeechSynthesisUtterance::new_with_text(text) {
            Ok(u) => u,
            Err(e) => {
                log::error!("[narration] utterance creation failed: {:?}", e);
                self.machine.borrow_mut().failed(ticket);
                set_busy(false);
                return;
            }
        };
        utterance.set_lang(SPEECH_LANG);
        utterance.set_rate(SPEECH_RATE);
        utterance.set_pitch(SPEECH_PITCH);
        {
            let mut bag = self.playback_listeners.borrow_mut();
            let machine = self.machine.clone();
            bag.attach(&utterance.clone().into(), "end", move |_| {
                machine.borrow_mut().completed(ticket);
                set_busy(false);
            });
            let machine = self.machine.clone();
            bag.attach(&utterance.clone().into(), "error", move |_| {
                machine.borrow_mut().failed(ticket);
                set_busy(false);
            });
        }
        synth.speak(&utterance);
        self.machine.borrow_mut().playback_started(ticket);
        // keep the utterance alive; some engines drop callbacks for collected ones
        *self.utterance.borrow_mut() = Some(utterance);
    }

    /// Silence both output paths. Listeners are detached first so teardown
    /// of the old playback never fires stale completions.
    fn stop_outputs(&self) {
        self.playback_listeners.borrow_mut().detach_all();
        if let Some(audio) = self.audio.borrow_mut().take() {
            _ = audio.pause();
            audio.set_src("");
        }
        if let Some(Ok(synth)) = web::window().map(|w| w.speech_synthesis()) {
            synth.cancel();
        }
        self.utterance.borrow_mut().take();
    }
}

fn set_busy(busy: bool) {
    if let Some(document) = dom::window_document() {
        crate::overlay::set_speak_busy(&document, busy);
    }
}

async fn fetch_narration(title: &str, description: &str) -> anyhow::Result<String> {
    let body = serde_json::to_string(&NarrationRequestBody { title, description })?;
    let opts = web::RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));
    let request = web::Request::new_with_str_and_init(NARRATION_ENDPOINT, &opts)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow::anyhow!("fetch error: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("narration service returned {}", resp.status());
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("non-text narration response"))?;
    let reply: NarrationReply = serde_json::from_str(&text)?;
    if reply.media.is_empty() {
        anyhow::bail!("narration service returned an empty media reference");
    }
    Ok(reply.media)
}
