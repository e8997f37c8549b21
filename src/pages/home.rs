use leptos::prelude::*;

use crate::components::palette_editor::PaletteEditor;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="editor-page">
				<div class="editor-overlay">
					<h1>"Palette Editor"</h1>
					<p class="subtitle">
						"Double-click to add a color, drag to move it. J joins, X disconnects, M/L retune curve sampling."
					</p>
				</div>
				<PaletteEditor />
			</div>
		</ErrorBoundary>
	}
}
