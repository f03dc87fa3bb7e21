//! Capture Page
//!
//! Photograph or upload a receipt and submit it as a new expense.

use std::rc::Rc;

use leptos::*;
use web_sys::{File, HtmlVideoElement};

use crate::api::ApiClient;
use crate::components::loading::InlineLoading;
use crate::components::StatusBanner;
use crate::config::AppConfig;
use crate::media::{open_rear_camera, read_as_data_url, snapshot_jpeg, CameraSession, MediaError};
use crate::state::{submit_capture, CaptureMachine, DetailsForm, HeldImage, SubmitOutcome};

type BrowserCapture = CaptureMachine<CameraSession, File>;

/// Capture page component
#[component]
pub fn Capture() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let api = Rc::new(ApiClient::new(config));

    let capture = create_rw_signal(BrowserCapture::new());
    let form = create_rw_signal(DetailsForm::default());
    let video_ref = create_node_ref::<html::Video>();
    let file_input = create_node_ref::<html::Input>();

    on_cleanup(move || {
        capture.try_update(|m| m.teardown());
    });

    let camera_active = move || capture.with(|m| m.camera_active());
    let camera_pending = move || capture.with(|m| m.camera_pending());
    let submitting = move || capture.with(|m| m.submitting());
    let can_submit = move || capture.with(|m| m.can_submit());

    let open_camera = move |_| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        let video: &HtmlVideoElement = &video;
        let video = video.clone();

        if !capture.try_update(|m| m.request_camera()).unwrap_or(false) {
            return;
        }

        spawn_local(async move {
            let result = match open_rear_camera().await {
                Ok(stream) => CameraSession::attach(stream, video),
                Err(e) => Err(e),
            };

            // If the page is gone the session is dropped here, which releases it
            capture.try_update(|m| match result {
                Ok(session) => m.camera_opened(session),
                Err(e) => m.camera_failed(&e),
            });
        });
    };

    let take_photo = move |_| {
        let Some(video) = capture.with_untracked(|m| m.camera().map(|s| s.video().clone())) else {
            return;
        };

        spawn_local(async move {
            let result = async {
                let file = snapshot_jpeg(&video).await?;
                let preview = read_as_data_url(&file).await?;
                let name = file.name();
                Ok::<_, MediaError>(HeldImage::new(file, name, preview))
            }
            .await;

            capture.try_update(|m| match result {
                Ok(image) => m.frame_captured(image),
                Err(e) => m.capture_failed(&e),
            });
        });
    };

    let cancel_camera = move |_| capture.update(|m| m.cancel_camera());

    let on_file = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let Some(ticket) = capture.try_update(|m| m.begin_selection()) else {
            return;
        };

        spawn_local(async move {
            let name = file.name();
            match read_as_data_url(&file).await {
                Ok(preview) => {
                    capture.try_update(|m| {
                        m.image_selected(ticket, HeldImage::new(file, name, preview))
                    });
                }
                Err(e) => {
                    capture.try_update(|m| m.image_failed(ticket, &e));
                }
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let api = Rc::clone(&api);
        let details = form.get_untracked();
        spawn_local(async move {
            let outcome = submit_capture(capture, api.as_ref(), &details).await;
            if let Some(SubmitOutcome::Created(_)) = outcome {
                form.try_set(DetailsForm::default());
                if let Some(input) = file_input.get_untracked() {
                    input.set_value("");
                }
            }
        });
    };

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Add Expense"</h1>

            <div class="grid md:grid-cols-[1fr_auto_1fr] gap-8 items-start">
                // Camera
                <section class="space-y-4">
                    <h2 class="text-lg font-semibold text-gray-700">"Take Photo"</h2>

                    {move || (!camera_active()).then(|| view! {
                        <button
                            type="button"
                            on:click=open_camera
                            disabled=camera_pending
                            class="w-full py-4 text-lg bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400
                                   text-white rounded-lg font-medium transition-colors"
                        >
                            {move || if camera_pending() { "Opening camera..." } else { "📷 Open Camera" }}
                        </button>
                    })}

                    // Always mounted so the stream has somewhere to attach
                    <div class=move || if camera_active() { "flex flex-col gap-4" } else { "hidden" }>
                        <video
                            node_ref=video_ref
                            autoplay=true
                            playsinline=true
                            prop:muted=true
                            class="w-full max-w-xs rounded-lg bg-black"
                        />
                        <div class="flex gap-2">
                            <button
                                type="button"
                                on:click=take_photo
                                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium"
                            >
                                "📸 Capture"
                            </button>
                            <button
                                type="button"
                                on:click=cancel_camera
                                class="px-4 py-2 bg-gray-200 hover:bg-gray-300 rounded-lg font-medium"
                            >
                                "❌ Cancel"
                            </button>
                        </div>
                    </div>
                </section>

                <div class="self-center text-gray-500 font-medium">"or"</div>

                // File picker
                <section class="space-y-4">
                    <h2 class="text-lg font-semibold text-gray-700">"Upload Image"</h2>
                    <input
                        node_ref=file_input
                        type="file"
                        accept="image/*"
                        on:change=on_file
                        class="w-full p-3 border-2 border-dashed border-gray-300 rounded-lg bg-gray-50
                               hover:border-blue-600 hover:bg-blue-50 cursor-pointer"
                    />
                </section>
            </div>

            // Preview
            {move || capture.with(|m| m.preview().map(str::to_string)).map(|src| view! {
                <section class="space-y-2">
                    <h3 class="text-lg font-semibold text-gray-700">"Preview"</h3>
                    <img src=src alt="Receipt preview" class="max-w-xs max-h-96 rounded-lg shadow" />
                </section>
            })}

            <form on:submit=on_submit class="space-y-4">
                <DetailsFields form=form />

                <button
                    type="submit"
                    disabled=move || !can_submit()
                    class="w-full py-4 text-lg bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400
                           disabled:cursor-not-allowed text-white rounded-lg font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || if submitting() {
                        view! {
                            <InlineLoading />
                            <span>"Processing..."</span>
                        }.into_view()
                    } else {
                        view! { <span>"💾 Save Expense"</span> }.into_view()
                    }}
                </button>
            </form>

            {move || capture.with(|m| m.message().cloned()).map(|message| view! {
                <StatusBanner message=message />
            })}
        </div>
    }
}

/// Optional fields that override what the backend reads off the receipt
#[component]
fn DetailsFields(form: RwSignal<DetailsForm>) -> impl IntoView {
    view! {
        <details class="bg-gray-50 rounded-lg p-4">
            <summary class="cursor-pointer font-medium text-gray-700">"Add details (optional)"</summary>

            <div class="grid md:grid-cols-2 gap-4 mt-4">
                <DetailField
                    label="Vendor"
                    get=move || form.with(|f| f.vendor.clone())
                    set=move |v| form.update(|f| f.vendor = v)
                />
                <DetailField
                    label="Amount"
                    placeholder="12.34"
                    kind="text"
                    get=move || form.with(|f| f.amount.clone())
                    set=move |v| form.update(|f| f.amount = v)
                />
                <DetailField
                    label="Date"
                    kind="date"
                    get=move || form.with(|f| f.date.clone())
                    set=move |v| form.update(|f| f.date = v)
                />
                <DetailField
                    label="Category"
                    get=move || form.with(|f| f.category.clone())
                    set=move |v| form.update(|f| f.category = v)
                />
                <DetailField
                    label="Description"
                    get=move || form.with(|f| f.description.clone())
                    set=move |v| form.update(|f| f.description = v)
                />
            </div>
        </details>
    }
}

#[component]
fn DetailField<G, S>(
    label: &'static str,
    #[prop(default = "text")]
    kind: &'static str,
    #[prop(optional)]
    placeholder: &'static str,
    get: G,
    set: S,
) -> impl IntoView
where
    G: Fn() -> String + 'static,
    S: Fn(String) + 'static,
{
    view! {
        <label class="block">
            <span class="block text-sm text-gray-600 mb-1">{label}</span>
            <input
                type=kind
                placeholder=placeholder
                prop:value=get
                on:input=move |ev| set(event_target_value(&ev))
                class="w-full rounded-lg px-3 py-2 border border-gray-300 focus:border-blue-500 focus:outline-none"
            />
        </label>
    }
}
