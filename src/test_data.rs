#[cfg(test)]
pub const POST_MD: &str = r#"---
id: "0d9a4c2e-52f1-4a7b-9c6d-8e0b1f3a5d77"
slug: "slow-reading"
createdAt: "2024-06-01"
updatedAt: "2024-06-03"
title: "In praise of slow reading"
shortTitle: "Slow reading"
description: "Why speed is the wrong metric for books."
tags: ["reading", "learning"]
---

Most advice about reading is advice about speed. Finish more books, skim the
boring parts, listen at double speed.

## The case for slowness

A book read slowly leaves deeper marks. The point was never the number of
pages behind you, it was the number of ideas that survived the trip.

<!-- maybe expand this into its own post -->

Read less, remember more.
"#;

#[cfg(test)]
pub const PROMPT_MD: &str = r#"---
id: "7f2b9e11-03ac-4c58-a21f-5d6e4b8c9a02"
slug: "weekly-review"
createdAt: "2024-03-01"
updatedAt: "2024-03-05"
title: "Weekly review assistant"
description: "Walks through a structured end-of-week reflection."
tags: ["thinking", "personal"]
keyword: ";weeklyreview"
arguments:
  focus: "The area of life to review"
---

## Context

Use this at the end of the week, before planning the next one.
<!-- tuned over a few months of Friday reviews -->
Works best with a calendar open next to it.

## Prompt

```md
Act as a thoughtful reviewer. Ask me one question at a time about my week,
focusing on {{focus}}. After five questions, summarize what went well and
what to change.
```

## Try

```md
Act as a thoughtful reviewer. Ask me one question at a time about my week,
focusing on health. After five questions, summarize what went well and
what to change.
```
"#;
