//! Admin panel: user list with role assignment

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::services::Services;
use crate::core::{Role, UserProfile};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, LoadingScreen};

/// Roles after toggling `role` on a user's current set
fn toggled(user: &UserProfile, role: Role) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|r| (*r == role) != user.has_role(*r))
        .collect()
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let auth = use_auth_context();

    let users = RwSignal::new(None::<Vec<UserProfile>>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        spawn_local(async move {
            let client = auth.api();
            match Services::new(&client).users().list().await {
                Ok(list) => users.set(Some(list)),
                Err(e) => {
                    users.set(Some(Vec::new()));
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    let toggle_role = move |user: UserProfile, role: Role| {
        error.set(None);
        spawn_local(async move {
            let client = auth.api();
            match Services::new(&client)
                .users()
                .update_roles(&user.id, &toggled(&user, role))
                .await
            {
                Ok(updated) => users.update(|list| {
                    if let Some(entry) = list
                        .iter_mut()
                        .flatten()
                        .find(|entry| entry.id == updated.id)
                    {
                        *entry = updated;
                    }
                }),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">"Users"</h1>
            <ErrorMessage error=error />
            {move || match users.get() {
                None => view! { <LoadingScreen label="Loading users...".to_string() /> }.into_any(),
                Some(list) => view! {
                    <table class="w-full bg-white rounded-xl border border-gray-200 text-sm">
                        <thead>
                            <tr class="text-left text-gray-500 border-b border-gray-200">
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Email"</th>
                                {Role::ALL.into_iter().map(|role| view! {
                                    <th class="px-4 py-3 text-center">{role.as_str()}</th>
                                }).collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {list.into_iter().map(|user| {
                                let cells = Role::ALL.into_iter().map(|role| {
                                    let user = user.clone();
                                    let checked = user.has_role(role);
                                    view! {
                                        <td class="px-4 py-3 text-center">
                                            <input
                                                type="checkbox"
                                                prop:checked=checked
                                                on:change=move |_| toggle_role(user.clone(), role)
                                            />
                                        </td>
                                    }
                                }).collect_view();
                                view! {
                                    <tr class="border-b border-gray-100 last:border-0">
                                        <td class="px-4 py-3 text-gray-900">{user.display_name()}</td>
                                        <td class="px-4 py-3 text-gray-600">{user.email.clone()}</td>
                                        {cells}
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::test_profile;

    #[test]
    fn test_toggled_adds_and_removes() {
        let user = test_profile("u", &[Role::Teacher]);

        assert_eq!(toggled(&user, Role::Admin), [Role::Admin, Role::Teacher]);
        assert_eq!(toggled(&user, Role::Teacher), Vec::<Role>::new());
    }
}
