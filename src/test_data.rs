#[cfg(test)]
pub const POST_DATA_MD: &str = "---
title: What I learned after 20+ years of software development
date: 2022-04-02 12:05:00
tags:
  - career
  - software
published: true
author: thiago
---
How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

Disclaimer: I don't think I am a great engineer, but I would love to have listened to that myself when I started my career, over 20 years ago.

I will divide this in parts, non-technical and technical

<!-- more -->

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. You solved many hard problems.
It's common to think you are awesome and the smartest person in the planet.
Some day in your life, you will find that you are not and that there are many developers much better than you. Not in capacity, but in wisdom and knowledge. ==The earlier you find that, the better.== This will drive you to improve yourself as you now recognize better your weakest points.
";

#[cfg(test)]
pub const POST_DATA_TOML: &str = "+++
title = \"A TOML post\"
date = 2024-02-12T22:54:00Z
index = false
+++
Body of the TOML post
";

#[cfg(test)]
pub const MIXED_MD: &str = "# Mixed content

Some **bold** text and a ==first mark== in a paragraph.

- plain item
- ==highlighted item==

> A quote with ==marked words==.
";
