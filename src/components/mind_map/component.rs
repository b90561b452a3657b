//! Leptos component wrapping the mind map canvas.
//!
//! The component owns a [`MindMapState`] behind `Rc<RefCell<_>>`, redraws it
//! every animation frame and forwards pointer input to it. Store round trips
//! run on `spawn_local`; the state is only borrowed before and after each
//! `.await`, never across it. Toolbar, selection panel and notice line are
//! plain Leptos views fed from signals that are synced after every state
//! change.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::ClickOutcome;
use super::layout::LayoutStrategy;
use super::links::{LinkMutation, LinkService};
use super::render;
use super::state::{MindMapState, Notice, NoticeLevel, RefreshTicket};
use super::theme::Theme;
use super::types::{Bounds, NoteId, Point};
use crate::config::AppConfig;
use crate::store::{AppStore, NoteStore};

/// Graph state plus the theme it is drawn with.
struct MindMapContext {
	state: MindMapState,
	theme: Theme,
}

/// One outgoing link as listed in the selection panel.
#[derive(Clone, Debug, PartialEq)]
struct LinkEntry {
	target: NoteId,
	title: String,
}

#[derive(Clone, Debug, PartialEq)]
struct SelectionPanel {
	id: NoteId,
	title: String,
	links: Vec<LinkEntry>,
}

/// Reactive mirror of the parts of the state the HTML overlay shows.
#[derive(Clone, Copy)]
struct UiSignals {
	zoom: RwSignal<u32>,
	strategy: RwSignal<LayoutStrategy>,
	connecting: RwSignal<bool>,
	source_picked: RwSignal<bool>,
	loading: RwSignal<bool>,
	search: RwSignal<String>,
	tags: RwSignal<Vec<String>>,
	active_tags: RwSignal<Vec<String>>,
	node_count: RwSignal<usize>,
	selection: RwSignal<Option<SelectionPanel>>,
	notice: RwSignal<Option<Notice>>,
}

fn set_if_changed<T>(signal: RwSignal<T>, value: T)
where
	T: PartialEq + Send + Sync + 'static,
{
	// A fetch can land after unmount, when the signal is already disposed.
	if signal.try_with_untracked(|current| *current != value) == Some(true) {
		signal.set(value);
	}
}

impl UiSignals {
	fn new(strategy: LayoutStrategy) -> Self {
		Self {
			zoom: RwSignal::new(100),
			strategy: RwSignal::new(strategy),
			connecting: RwSignal::new(false),
			source_picked: RwSignal::new(false),
			loading: RwSignal::new(true),
			search: RwSignal::new(String::new()),
			tags: RwSignal::new(Vec::new()),
			active_tags: RwSignal::new(Vec::new()),
			node_count: RwSignal::new(0),
			selection: RwSignal::new(None),
			notice: RwSignal::new(None),
		}
	}

	fn sync(&self, state: &mut MindMapState) {
		set_if_changed(self.zoom, state.viewport.percent());
		set_if_changed(self.strategy, state.strategy());
		set_if_changed(self.connecting, state.interaction.is_connecting());
		set_if_changed(self.source_picked, state.interaction.connect_source().is_some());
		set_if_changed(self.loading, state.loading);
		set_if_changed(self.tags, state.known_tags().to_vec());
		set_if_changed(self.active_tags, state.query().tags.clone());
		set_if_changed(self.node_count, state.graph().nodes.len());
		set_if_changed(self.selection, selection_panel(state));
		if let Some(notice) = state.take_notices().pop() {
			self.notice.set(Some(notice));
		}
	}
}

fn selection_panel(state: &MindMapState) -> Option<SelectionPanel> {
	let graph = state.graph();
	let node = graph.node(state.interaction.selected()?)?;
	let links = graph
		.links_from(&node.id)
		.filter_map(|edge| graph.node(&edge.target))
		.map(|target| LinkEntry {
			target: target.id.clone(),
			title: target.title.clone(),
		})
		.collect();
	Some(SelectionPanel {
		id: node.id.clone(),
		title: node.title.clone(),
		links,
	})
}

/// Shared handles used by every event handler and background task.
#[derive(Clone)]
struct Controller {
	context: Rc<RefCell<Option<MindMapContext>>>,
	service: Rc<LinkService<AppStore>>,
	ui: UiSignals,
}

impl Controller {
	/// Runs `f` on the mounted context and syncs the overlay afterwards.
	fn update<R>(&self, f: impl FnOnce(&mut MindMapContext) -> R) -> Option<R> {
		let mut guard = self.context.borrow_mut();
		let c = guard.as_mut()?;
		let result = f(c);
		self.ui.sync(&mut c.state);
		Some(result)
	}

	fn edit(&self, f: impl FnOnce(&mut MindMapState)) {
		self.update(|c| f(&mut c.state));
	}

	/// Runs a state change that asks for new notes, then fetches them.
	fn request(&self, f: impl FnOnce(&mut MindMapState) -> RefreshTicket) {
		if let Some(ticket) = self.update(|c| f(&mut c.state)) {
			self.refresh(ticket);
		}
	}

	fn refresh(&self, ticket: RefreshTicket) {
		let this = self.clone();
		spawn_local(async move {
			let result = this
				.service
				.store()
				.list_notes(this.service.session())
				.await;
			let outcome = this.update(|c| c.state.finish_refresh(ticket, result));
			debug!("mindmap: refresh finished: {:?}", outcome);
		});
	}

	fn commit(&self, mutation: LinkMutation) {
		let this = self.clone();
		spawn_local(async move {
			let result = this.service.commit(&mutation).await;
			this.update(|c| c.state.finish_link(&mutation, result));
		});
	}

	fn pointer_down(&self, at: Point) {
		self.update(|c| c.state.pointer_down(at, &c.theme.node));
	}

	/// Ends a press. A click on a node goes through selection or connect
	/// mode, and a requested link is committed in the background.
	fn pointer_up(&self) {
		let mutation = self
			.update(|c| {
				let node = c.state.pointer_up()?;
				match c.state.click_node(&node) {
					ClickOutcome::LinkRequested { source, target } => {
						c.state.plan_create(&self.service, &source, &target)
					}
					_ => None,
				}
			})
			.flatten();
		if let Some(mutation) = mutation {
			self.commit(mutation);
		}
	}

	fn delete_link(&self, source: &str, target: &str) {
		self.commit(self.service.plan_delete(source, target));
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	let fallback = Bounds::default();
	if fullscreen {
		return window_size(window).unwrap_or((fallback.width, fallback.height));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(fallback.width)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(fallback.height)
		}),
	)
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn notice_class(level: NoticeLevel) -> &'static str {
	match level {
		NoticeLevel::Info => "mindmap-notice info",
		NoticeLevel::Success => "mindmap-notice success",
		NoticeLevel::Error => "mindmap-notice error",
	}
}

/// Renders the notes mind map with its toolbar and selection panel.
///
/// Notes come from the store described by `config`. The canvas sizes itself
/// to its parent by default; `fullscreen = true` fills the window and follows
/// window resizes. Explicit `width`/`height` override automatic sizing.
///
/// The host app can hook in through `on_open_note`, which adds an "Open"
/// button to the selection panel, and `on_create_note`, which adds a
/// "New note" button to the toolbar.
#[component]
pub fn MindMapCanvas(
	/// Store, layout and theme settings.
	config: AppConfig,
	/// Fill the window instead of the parent element.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed canvas width in pixels.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height in pixels.
	#[prop(default = None)]
	height: Option<f64>,
	/// Called with the selected note's id when "Open" is pressed.
	#[prop(optional)]
	on_open_note: Option<Callback<NoteId>>,
	/// Called when "New note" is pressed.
	#[prop(optional)]
	on_create_note: Option<Callback<()>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let ui = UiSignals::new(config.layout);
	let ctl = StoredValue::new_local(Controller {
		context: Rc::new(RefCell::new(None)),
		service: Rc::new(LinkService::new(config.build_store(), config.session())),
		ui,
	});
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (layout, theme_name) = (config.layout, config.theme);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("mindmap: 2d canvas context unavailable");
			return;
		};

		let theme = Theme::by_name(&theme_name);
		let state = MindMapState::new(Bounds::new(w, h), layout, theme.palette.len());
		info!(
			"mindmap: mounted {}x{} canvas, {:?} layout, {} theme",
			w, h, layout, theme.name
		);
		ctl.with_value(|c| {
			*c.context.borrow_mut() = Some(MindMapContext { state, theme });
			c.request(MindMapState::request_refresh);
		});

		if fullscreen {
			let canvas_resize = canvas.clone();
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				let _ = ctl.try_with_value(|c| c.edit(|s| s.resize(Bounds::new(nw, nh))));
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			let dt = 0.016;
			let mounted = ctl.try_with_value(|c| {
				if let Some(ref mut m) = *c.context.borrow_mut() {
					m.state.tick(dt);
					render::render(&m.state, &ctx, &m.theme);
				}
			});
			// Stop the loop once the component is gone.
			if mounted.is_none() {
				return;
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(canvas_ref, &ev) {
			ctl.with_value(|c| c.pointer_down(at));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(canvas_ref, &ev) {
			ctl.with_value(|c| c.edit(|s| s.pointer_move(at)));
		}
	};

	let on_mouseup = move |_: MouseEvent| ctl.with_value(Controller::pointer_up);

	let on_mouseleave = move |_: MouseEvent| ctl.with_value(|c| c.edit(MindMapState::pointer_leave));

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let zoom_out = ev.delta_y() > 0.0;
		ctl.with_value(|c| {
			c.edit(|s| {
				if zoom_out {
					s.viewport.zoom_out();
				} else {
					s.viewport.zoom_in();
				}
			})
		});
	};

	let on_search = move |ev: leptos::ev::Event| {
		let term = event_target_value(&ev);
		ui.search.set(term.clone());
		ctl.with_value(|c| c.request(|s| s.set_search(term)));
	};

	let layout_buttons = LayoutStrategy::ALL
		.into_iter()
		.map(|strategy| {
			view! {
				<button
					class="mindmap-layout"
					class:active=move || ui.strategy.get() == strategy
					on:click=move |_| ctl.with_value(|c| c.request(|s| s.set_strategy(strategy)))
				>
					{strategy.label()}
				</button>
			}
		})
		.collect_view();

	let tag_chips = move || {
		let active = ui.active_tags.get();
		ui.tags
			.get()
			.into_iter()
			.map(|tag| {
				let selected = active.contains(&tag);
				let toggled = tag.clone();
				view! {
					<button
						class="mindmap-tag"
						class:active=selected
						on:click=move |_| ctl.with_value(|c| c.request(|s| s.toggle_tag(&toggled)))
					>
						{tag}
					</button>
				}
			})
			.collect_view()
	};

	let selection = move || {
		ui.selection.get().map(|panel| {
			let source = panel.id.clone();
			let open = on_open_note.map(|cb| {
				let id = panel.id.clone();
				view! {
					<button class="mindmap-open" on:click=move |_| cb.run(id.clone())>
						"Open"
					</button>
				}
			});
			let empty = panel.links.is_empty();
			let rows = panel
				.links
				.into_iter()
				.map(|link| {
					let (from, to) = (source.clone(), link.target.clone());
					view! {
						<li>
							<span>{link.title}</span>
							<button
								class="mindmap-unlink"
								title="Delete connection"
								on:click=move |_| ctl.with_value(|c| c.delete_link(&from, &to))
							>
								"×"
							</button>
						</li>
					}
				})
				.collect_view();
			view! {
				<aside class="mindmap-panel">
					<header>
						<h2>{panel.title}</h2>
						<button
							title="Close"
							on:click=move |_| {
								ctl.with_value(|c| c.edit(|s| s.interaction.clear_selection()))
							}
						>
							"×"
						</button>
					</header>
					{open}
					{empty.then(|| view! { <p class="mindmap-muted">"No outgoing connections"</p> })}
					<ul>{rows}</ul>
				</aside>
			}
		})
	};

	let notice = move || {
		ui.notice.get().map(|n| {
			view! {
				<div class=notice_class(n.level)>
					<span>{n.message}</span>
					<button on:click=move |_| ui.notice.set(None)>"×"</button>
				</div>
			}
		})
	};

	let create = on_create_note.map(|cb| {
		view! {
			<button class="mindmap-create" on:click=move |_| cb.run(())>
				"New note"
			</button>
		}
	});

	view! {
		<div class="mindmap">
			<nav class="mindmap-toolbar">
				<button
					title="Zoom out"
					on:click=move |_| ctl.with_value(|c| c.edit(|s| s.viewport.zoom_out()))
				>
					"−"
				</button>
				<span class="mindmap-zoom">{move || format!("{}%", ui.zoom.get())}</span>
				<button
					title="Zoom in"
					on:click=move |_| ctl.with_value(|c| c.edit(|s| s.viewport.zoom_in()))
				>
					"+"
				</button>
				<button on:click=move |_| ctl.with_value(|c| c.edit(|s| s.viewport.reset_view()))>
					"Reset view"
				</button>
				<span class="mindmap-separator" />
				{layout_buttons}
				<span class="mindmap-separator" />
				<button
					class="mindmap-connect"
					class:active=move || ui.connecting.get()
					on:click=move |_| ctl.with_value(|c| c.edit(|s| s.interaction.toggle_connect()))
				>
					{move || if ui.connecting.get() { "Cancel connect" } else { "Connect" }}
				</button>
				<input
					type="search"
					class="mindmap-search"
					placeholder="Search notes"
					prop:value=move || ui.search.get()
					on:input=on_search
				/>
				{create}
			</nav>
			<div class="mindmap-tags">{tag_chips}</div>
			<Show when=move || ui.connecting.get()>
				<p class="mindmap-hint">
					{move || {
						if ui.source_picked.get() {
							"Click the note to connect to"
						} else {
							"Click the note to connect from"
						}
					}}
				</p>
			</Show>
			<canvas
				node_ref=canvas_ref
				class="mindmap-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style:display="block"
				style:cursor=move || if ui.connecting.get() { "crosshair" } else { "grab" }
			/>
			<Show when=move || ui.loading.get()>
				<p class="mindmap-loading">"Loading notes…"</p>
			</Show>
			<Show when=move || !ui.loading.get() && ui.node_count.get() == 0>
				<p class="mindmap-empty">"No notes to show"</p>
			</Show>
			{selection}
			{notice}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::components::mind_map::graph::tests::note;
	use crate::store::{MemoryNoteStore, Session};

	fn loaded_state() -> MindMapState {
		let store = MemoryNoteStore::new(
			"u1",
			vec![
				note("a", "alpha", &["b", "c"]),
				note("b", "beta", &[]),
				note("c", "gamma", &["a"]),
			],
		);
		let mut state = MindMapState::new(Bounds::new(800.0, 600.0), LayoutStrategy::Grid, 6);
		block_on(state.refresh(&store, &Session::new("u1")));
		state
	}

	#[test]
	fn no_panel_without_selection() {
		assert_eq!(selection_panel(&loaded_state()), None);
	}

	#[test]
	fn panel_lists_outgoing_links_of_selected_note() {
		let mut state = loaded_state();
		state.click_node("a");
		let panel = selection_panel(&state).unwrap();
		assert_eq!(panel.id, "a");
		assert_eq!(panel.title, "alpha");
		let targets: Vec<_> = panel.links.iter().map(|l| l.target.as_str()).collect();
		assert_eq!(targets, ["b", "c"]);
		assert_eq!(panel.links[1].title, "gamma");
	}

	#[test]
	fn panel_follows_selection_change() {
		let mut state = loaded_state();
		state.click_node("a");
		state.click_node("b");
		let panel = selection_panel(&state).unwrap();
		assert_eq!(panel.id, "b");
		assert!(panel.links.is_empty());
	}

	#[test]
	fn notice_levels_map_to_css_classes() {
		assert_eq!(notice_class(NoticeLevel::Error), "mindmap-notice error");
		assert_eq!(notice_class(NoticeLevel::Success), "mindmap-notice success");
	}
}
